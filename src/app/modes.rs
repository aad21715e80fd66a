//! Screen state machine of the application.
//!
//! The roster shows exactly one [`Screen`] at a time:
//! - **List**: the patient table
//! - **Detail**: one patient's profile, loaded through the store
//! - **Form**: the create or edit form
//!
//! Each screen carries the data it needs, so leaving a screen drops its state.

use super::form::PatientForm;
use crate::domain::{Patient, PatientId};

/// Load state of the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// Waiting for the store to answer a `GetPatient`.
    Loading(PatientId),
    Loaded(Patient),
    /// The store does not know this id (never existed or deleted meanwhile).
    Missing(PatientId),
}

impl DetailState {
    #[must_use]
    pub const fn id(&self) -> &PatientId {
        match self {
            Self::Loading(id) | Self::Missing(id) => id,
            Self::Loaded(patient) => &patient.id,
        }
    }
}

/// Screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail(DetailState),
    Form(Box<PatientForm>),
}

impl Screen {
    /// Short name used in logs and the header.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail(_) => "detail",
            Self::Form(_) => "form",
        }
    }
}
