//! Side effects requested by the event handler.
//!
//! The handler never touches the store itself. It returns a `Vec<Action>`
//! and the runtime executes them in order, feeding any store responses back
//! in as [`Event::StoreResponse`](super::Event::StoreResponse).
//!
//! # Example
//!
//! ```rust
//! use patient_roster::app::Action;
//! use patient_roster::worker::StoreMessage;
//!
//! let actions = vec![Action::PostToStore(StoreMessage::ListPatients)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::StoreMessage;

/// Commands executed by the runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a message to the store worker.
    ///
    /// Fire-and-forget from the view's point of view: the state is only
    /// updated when the responses come back.
    PostToStore(StoreMessage),

    /// Ends the session.
    Quit,
}
