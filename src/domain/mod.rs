//! Domain layer for the patient roster.
//!
//! Core record types and error handling, independent of the store, the table
//! engine and the terminal UI.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`patient`]: Patient record, status enum and mutation payload
//!
//! # Examples
//!
//! ```
//! use patient_roster::domain::{Patient, PatientFields, PatientId, PatientStatus};
//!
//! let fields = PatientFields {
//!     first_name: "Ada".to_string(),
//!     last_name: "Lovelace".to_string(),
//!     date_of_birth: "12/10/1815".to_string(),
//!     address: "12 St James's Square, London".to_string(),
//!     ..Default::default()
//! };
//! let patient = Patient::from_fields(PatientId::new("p1"), fields, 0);
//! assert_eq!(patient.status, PatientStatus::Inquiry);
//! ```

pub mod error;
pub mod patient;

pub use error::{Result, RosterError};
pub use patient::{
    parse_locale_date, Patient, PatientFields, PatientId, PatientStatus, LOCALE_DATE_FORMAT,
};
