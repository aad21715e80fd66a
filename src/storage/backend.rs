//! Patient store abstraction.
//!
//! [`PatientStore`] mirrors the five procedures of the hosted document store
//! the roster was built against. Each method maps directly to a
//! [`StoreMessage`](crate::worker::StoreMessage) handled by the store worker.

use crate::domain::error::Result;
use crate::domain::{Patient, PatientFields, PatientId};

/// Abstraction over patient store backends.
///
/// # Implementations
///
/// - [`JsonStore`](super::JsonStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](super::MemoryStore): in-process, nothing persisted
///
/// # Examples
///
/// ```no_run
/// use patient_roster::storage::{JsonStore, PatientStore};
/// use std::path::PathBuf;
///
/// let store = JsonStore::new(PathBuf::from("/tmp/patients.json"))?;
/// let patients = store.list()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PatientStore: Send {
    /// Returns every record, unfiltered, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self) -> Result<Vec<Patient>>;

    /// Returns one record, or `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, id: &PatientId) -> Result<Option<Patient>>;

    /// Stores a new record and returns its id.
    ///
    /// A missing `status` is stored as `Inquiry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&mut self, fields: PatientFields) -> Result<PatientId>;

    /// Replaces every field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`](crate::domain::RosterError::NotFound)
    /// for an unknown id, or an error if the write fails.
    fn update(&mut self, id: &PatientId, fields: PatientFields) -> Result<()>;

    /// Deletes every listed record, ignoring unknown ids.
    ///
    /// Returns the number of records actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_many(&mut self, ids: &[PatientId]) -> Result<usize>;
}
