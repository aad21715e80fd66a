//! Message-driven bridge between the application and the patient store.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol types
//! - `handler`: [`StoreWorker`], which owns the store and processes messages

pub mod handler;
pub mod messages;

pub use handler::StoreWorker;
pub use messages::{StoreMessage, StoreResponse};
