//! Storage layer for the patient roster.
//!
//! # Modules
//!
//! - `backend`: the [`PatientStore`] trait, one method per store procedure
//! - `json`: JSON file store with atomic writes
//! - `memory`: in-process store
//! - `models`: the shared document format and record semantics

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::PatientStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use models::{StoreData, STORE_FORMAT_VERSION};
