//! JSON file-based patient store.
//!
//! The whole document is held in memory and rewritten after each mutation
//! using an atomic write (write-to-temp + rename), so a crash never leaves a
//! half-written file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: served from memory, the file is parsed once on open
//! - **Write**: O(n), serializes and writes the entire roster
//! - **Best for**: a single clinic's roster, a few thousand records at most

use crate::domain::error::{Result, RosterError};
use crate::domain::{Patient, PatientFields, PatientId};
use crate::storage::backend::PatientStore;
use crate::storage::models::{StoreData, STORE_FORMAT_VERSION};
use std::path::{Path, PathBuf};

/// JSON file patient store.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the store worker.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "patients": [
///     {
///       "id": "6f1c2a0e-...",
///       "firstName": "Grace",
///       "lastName": "Hopper",
///       "dateOfBirth": "12/9/1906",
///       "address": "Arlington, VA",
///       "status": "Active",
///       "createdAt": 1700000000
///     }
///   ]
/// }
/// ```
pub struct JsonStore {
    file_path: PathBuf,
    data: StoreData,
    /// Set when `data` has changes not yet on disk.
    dirty: bool,
}

impl JsonStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty roster; it is written on the first
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not a valid store document
    /// - The file was written by a newer format version
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::info!(patients = data.patients.len(), path = ?file_path, "store opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| RosterError::Store(format!("failed to parse {}: {e}", path.display())))?;

        if data.version > STORE_FORMAT_VERSION {
            return Err(RosterError::Store(format!(
                "{} uses store format {}, newest supported is {STORE_FORMAT_VERSION}",
                path.display(),
                data.version
            )));
        }

        tracing::debug!(version = data.version, patients = data.patients.len(), "loaded store data");
        Ok(data)
    }

    /// Writes the roster to disk if it changed since the last save.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename
    /// fails. The data stays dirty in that case.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }

    /// Applies `change` and saves the result.
    ///
    /// A failed save restores the roster as it was before `change`, so a
    /// rejected mutation is never visible to later reads or saved on drop.
    fn commit<T>(&mut self, change: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let previous = self.data.clone();
        let value = change(&mut self.data)?;

        self.dirty = true;
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "save failed, rolling back");
            self.data = previous;
            self.dirty = false;
            return Err(e);
        }

        Ok(value)
    }
}

impl PatientStore for JsonStore {
    fn list(&self) -> Result<Vec<Patient>> {
        let _span = tracing::debug_span!("json_list").entered();
        Ok(self.data.patients.clone())
    }

    fn get(&self, id: &PatientId) -> Result<Option<Patient>> {
        let _span = tracing::debug_span!("json_get", patient_id = %id).entered();

        let patient = self.data.get(id).cloned();
        tracing::debug!(found = patient.is_some(), "patient lookup complete");
        Ok(patient)
    }

    fn insert(&mut self, fields: PatientFields) -> Result<PatientId> {
        let _span = tracing::debug_span!("json_insert").entered();

        let created_at = chrono::Utc::now().timestamp();
        let id = self.commit(|data| Ok(data.insert(fields, created_at)))?;

        tracing::debug!(patient_id = %id, "patient inserted");
        Ok(id)
    }

    fn update(&mut self, id: &PatientId, fields: PatientFields) -> Result<()> {
        let _span = tracing::debug_span!("json_update", patient_id = %id).entered();

        self.commit(|data| data.update(id, fields))
    }

    fn delete_many(&mut self, ids: &[PatientId]) -> Result<usize> {
        let _span = tracing::debug_span!("json_delete_many", requested = ids.len()).entered();

        if !ids.iter().any(|id| self.data.get(id).is_some()) {
            tracing::debug!("no matching patients, nothing to save");
            return Ok(0);
        }
        let removed = self.commit(|data| Ok(data.delete_many(ids)))?;

        tracing::debug!(removed, "patients deleted");
        Ok(removed)
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.flush() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fields(last: &str) -> PatientFields {
        PatientFields {
            first_name: "Pat".into(),
            last_name: last.into(),
            date_of_birth: "7/4/1976".into(),
            address: "1 Liberty Way".into(),
            ..Default::default()
        }
    }

    #[test]
    fn mutations_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("patients.json");

        let id = {
            let mut store = JsonStore::new(path.clone()).unwrap();
            let id = store.insert(fields("Doe")).unwrap();
            store.insert(fields("Roe")).unwrap();
            id
        };

        let mut store = JsonStore::new(path).unwrap();
        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.last_name).collect();
        assert_eq!(names, ["Doe", "Roe"]);

        assert_eq!(store.delete_many(&[id]).unwrap(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn no_temporary_file_is_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");

        let mut store = JsonStore::new(path.clone()).unwrap();
        store.insert(fields("Doe")).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn opening_does_not_create_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");

        let store = JsonStore::new(path.clone()).unwrap();
        drop(store);
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::new(path).err().unwrap();
        assert!(matches!(err, RosterError::Store(_)));
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(&path, r#"{"version":99,"patients":[]}"#).unwrap();

        assert!(JsonStore::new(path).is_err());
    }

    #[test]
    fn failed_save_leaves_the_roster_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        let tmp_path = path.with_extension("tmp");

        let mut store = JsonStore::new(path.clone()).unwrap();
        let id = store.insert(fields("Doe")).unwrap();

        // A directory where the temporary file goes makes every save fail.
        std::fs::create_dir(&tmp_path).unwrap();

        assert!(store.insert(fields("Roe")).is_err());
        assert!(store.update(&id, fields("Poe")).is_err());
        assert!(store.delete_many(&[id.clone()]).is_err());

        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.last_name).collect();
        assert_eq!(names, ["Doe"]);
        drop(store);

        std::fs::remove_dir(&tmp_path).unwrap();
        let store = JsonStore::new(path).unwrap();
        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.last_name).collect();
        assert_eq!(names, ["Doe"]);
    }

    #[test]
    fn deleting_nothing_does_not_touch_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");

        let mut store = JsonStore::new(path.clone()).unwrap();
        assert_eq!(store.delete_many(&[PatientId::new("ghost")]).unwrap(), 0);
        assert!(!path.exists());
    }
}
