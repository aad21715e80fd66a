//! Store worker message types.
//!
//! The application never calls a [`PatientStore`](crate::storage::PatientStore)
//! directly. It posts a [`StoreMessage`] and later receives one or more
//! [`StoreResponse`]s, the same request/response shape the hosted document
//! store had. Both types serialize to JSON so the worker can sit on the other
//! side of a thread or process boundary.

use crate::domain::{Patient, PatientFields, PatientId};
use serde::{Deserialize, Serialize};

/// Requests sent from the application to the store worker.
///
/// One variant per store procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreMessage {
    /// Fetch the full, unfiltered roster.
    ListPatients,

    /// Fetch a single record for the detail page.
    GetPatient { id: PatientId },

    /// Create a record. A missing status becomes `Inquiry`.
    InsertPatient { fields: PatientFields },

    /// Replace every field of an existing record.
    UpdatePatient { id: PatientId, fields: PatientFields },

    /// Delete records, ignoring ids the store does not know.
    DeletePatients { ids: Vec<PatientId> },
}

impl StoreMessage {
    /// Short operation name used in logs and error messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::ListPatients => "list patients",
            Self::GetPatient { .. } => "get patient",
            Self::InsertPatient { .. } => "insert patient",
            Self::UpdatePatient { .. } => "update patient",
            Self::DeletePatients { .. } => "delete patients",
        }
    }

    /// Whether the message changes stored data.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::InsertPatient { .. } | Self::UpdatePatient { .. } | Self::DeletePatients { .. }
        )
    }
}

/// Responses sent from the store worker back to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreResponse {
    /// A fresh snapshot of the whole roster, in insertion order.
    ///
    /// Also pushed after every successful mutation.
    PatientsLoaded { patients: Vec<Patient> },

    /// Result of a single-record lookup; `patient` is `None` for unknown ids.
    PatientLoaded {
        id: PatientId,
        patient: Option<Patient>,
    },

    PatientInserted { id: PatientId },

    PatientUpdated { id: PatientId },

    /// Records were deleted. `ids` echoes the request; `removed` counts the
    /// ones that existed.
    PatientsDeleted { ids: Vec<PatientId>, removed: usize },

    /// A store operation failed.
    Error {
        /// Human-readable error message, prefixed with the operation name.
        message: String,
    },
}
