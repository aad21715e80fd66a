//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the command loop (main.rs) and the
//! domain/table/worker layers and implements the event-driven flow that
//! powers the roster.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Commands → Events → Event Handler → State Mutations → Actions → Store Worker
//!                         ↑                                           ↓
//!                         └──────────── Store Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Create/edit form state and validation
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Screen state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use patient_roster::app::{handle_event, AppState, Event};
//! use patient_roster::table::TableOptions;
//! use patient_roster::ui::Theme;
//!
//! let mut state = AppState::new(TableOptions::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Load)?;
//! assert!(!render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), patient_roster::domain::RosterError>(())
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{FormMode, PatientForm};
pub use handler::{handle_event, Event};
pub use modes::{DetailState, Screen};
pub use state::{AppState, Notice, NoticeLevel};
