//! On-disk document format shared by the store backends.
//!
//! [`StoreData`] is both the serialized file body of
//! [`JsonStore`](super::JsonStore) and the in-memory table of
//! [`MemoryStore`](super::MemoryStore). The record operations live here so
//! both backends apply the same semantics.

use crate::domain::{Patient, PatientFields, PatientId, Result, RosterError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current version of the store file format.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Top-level document of the patient store.
///
/// Records are kept in insertion order, which is the order `list` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    /// Version of the storage format for future migrations.
    pub version: u32,

    #[serde(default)]
    pub patients: Vec<Patient>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            patients: Vec::new(),
        }
    }
}

impl StoreData {
    #[must_use]
    pub fn get(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.iter().find(|patient| &patient.id == id)
    }

    /// Appends a new record built from `fields` and returns its fresh id.
    pub fn insert(&mut self, fields: PatientFields, created_at: i64) -> PatientId {
        let mut id = PatientId::generate();
        while self.get(&id).is_some() {
            id = PatientId::generate();
        }

        self.patients
            .push(Patient::from_fields(id.clone(), fields, created_at));
        id
    }

    /// Replaces every field of the record `id`.
    ///
    /// A missing `status` keeps the stored one; missing optional fields are
    /// cleared. `id` and `created_at` never change.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no record has this id.
    pub fn update(&mut self, id: &PatientId, fields: PatientFields) -> Result<()> {
        let patient = self
            .patients
            .iter_mut()
            .find(|patient| &patient.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;

        let status = fields.status.unwrap_or(patient.status);
        *patient = Patient::from_fields(
            patient.id.clone(),
            PatientFields {
                status: Some(status),
                ..fields
            },
            patient.created_at,
        );
        Ok(())
    }

    /// Removes every record whose id is in `ids` and returns how many went.
    ///
    /// Unknown ids are ignored.
    pub fn delete_many(&mut self, ids: &[PatientId]) -> usize {
        let doomed: HashSet<&PatientId> = ids.iter().collect();
        let before = self.patients.len();
        self.patients.retain(|patient| !doomed.contains(&patient.id));
        before - self.patients.len()
    }
}
