//! Error types for the patient roster.
//!
//! This module defines the centralized error type [`RosterError`] and a type alias
//! [`Result`] used throughout the crate. The table engine itself never produces
//! errors; they originate in the form layer (validation), the document store
//! (remote calls), and configuration or theme loading.

use thiserror::Error;

/// The main error type for patient roster operations.
///
/// # Examples
///
/// ```
/// use patient_roster::RosterError;
///
/// let err = RosterError::Validation {
///     field: "lastName",
///     message: "Last name is required".to_string(),
/// };
/// assert_eq!(err.to_string(), "Validation error on lastName: Last name is required");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// A required form field is missing or malformed.
    ///
    /// Raised by the form layer on submission, never by the table engine.
    #[error("Validation error on {field}: {message}")]
    Validation {
        /// Key of the offending field (`firstName`, `dateOfBirth`, ...).
        field: &'static str,
        /// Human-readable message shown next to the field.
        message: String,
    },

    /// The document store was unreachable or rejected the call.
    #[error("Store error: {0}")]
    Store(String),

    /// No patient exists with the given id.
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for patient roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
