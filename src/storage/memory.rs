//! In-process store used by tests and `--ephemeral` sessions.

use crate::domain::error::Result;
use crate::domain::{Patient, PatientFields, PatientId};
use crate::storage::backend::PatientStore;
use crate::storage::models::StoreData;

/// Patient store that lives only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `patients`, kept in the given order.
    #[must_use]
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            data: StoreData {
                patients,
                ..StoreData::default()
            },
        }
    }
}

impl PatientStore for MemoryStore {
    fn list(&self) -> Result<Vec<Patient>> {
        Ok(self.data.patients.clone())
    }

    fn get(&self, id: &PatientId) -> Result<Option<Patient>> {
        Ok(self.data.get(id).cloned())
    }

    fn insert(&mut self, fields: PatientFields) -> Result<PatientId> {
        let id = self.data.insert(fields, chrono::Utc::now().timestamp());
        tracing::debug!(patient_id = %id, "patient inserted in memory");
        Ok(id)
    }

    fn update(&mut self, id: &PatientId, fields: PatientFields) -> Result<()> {
        self.data.update(id, fields)
    }

    fn delete_many(&mut self, ids: &[PatientId]) -> Result<usize> {
        Ok(self.data.delete_many(ids))
    }
}
