//! Store worker: executes [`StoreMessage`]s against a [`PatientStore`].
//!
//! Successful mutations are followed by a fresh
//! [`StoreResponse::PatientsLoaded`] so the application always converges on
//! the stored state, the way a live subscription would push it.

use crate::domain::error::Result;
use crate::domain::{PatientFields, PatientId};
use crate::storage::PatientStore;
use crate::worker::{StoreMessage, StoreResponse};

/// Owns the store backend and answers store messages.
pub struct StoreWorker {
    store: Box<dyn PatientStore>,
}

impl StoreWorker {
    pub fn new(store: Box<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Standardizes logging and error mapping for a store call.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> StoreResponse
    where
        F: FnOnce(T) -> StoreResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "store operation failed");
                StoreResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_list(&self) -> StoreResponse {
        Self::handle_db_result("list patients", self.store.list(), |patients| {
            tracing::debug!(patient_count = patients.len(), "roster loaded");
            StoreResponse::PatientsLoaded { patients }
        })
    }

    fn handle_get(&self, id: PatientId) -> StoreResponse {
        Self::handle_db_result("get patient", self.store.get(&id), |patient| {
            StoreResponse::PatientLoaded { id, patient }
        })
    }

    fn handle_insert(&mut self, fields: PatientFields) -> StoreResponse {
        Self::handle_db_result("insert patient", self.store.insert(fields), |id| {
            StoreResponse::PatientInserted { id }
        })
    }

    fn handle_update(&mut self, id: PatientId, fields: PatientFields) -> StoreResponse {
        Self::handle_db_result("update patient", self.store.update(&id, fields), |()| {
            StoreResponse::PatientUpdated { id }
        })
    }

    fn handle_delete(&mut self, ids: Vec<PatientId>) -> StoreResponse {
        Self::handle_db_result("delete patients", self.store.delete_many(&ids), |removed| {
            StoreResponse::PatientsDeleted { ids, removed }
        })
    }

    /// Processes one message and returns every response it produces, in order.
    ///
    /// Reads yield one response. A successful mutation yields its confirmation
    /// followed by a fresh roster snapshot; a failed one yields only the error.
    pub fn handle_message(&mut self, message: StoreMessage) -> Vec<StoreResponse> {
        let span = tracing::debug_span!("store_handle_message", operation = message.operation());
        let _guard = span.entered();

        let mutation = message.is_mutation();
        let response = match message {
            StoreMessage::ListPatients => self.handle_list(),
            StoreMessage::GetPatient { id } => self.handle_get(id),
            StoreMessage::InsertPatient { fields } => self.handle_insert(fields),
            StoreMessage::UpdatePatient { id, fields } => self.handle_update(id, fields),
            StoreMessage::DeletePatients { ids } => self.handle_delete(ids),
        };

        if mutation && !matches!(response, StoreResponse::Error { .. }) {
            vec![response, self.handle_list()]
        } else {
            vec![response]
        }
    }

    /// JSON bridge around [`handle_message`](Self::handle_message).
    ///
    /// Takes a serialized [`StoreMessage`] and returns the serialized
    /// responses. A payload that does not parse is answered with a serialized
    /// [`StoreResponse::Error`].
    pub fn handle_payload(&mut self, payload: &str) -> Vec<String> {
        let responses = match serde_json::from_str::<StoreMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize store message");
                vec![StoreResponse::Error {
                    message: format!("invalid store message: {e}"),
                }]
            }
        };

        responses
            .iter()
            .filter_map(|response| match serde_json::to_string(response) {
                Ok(json) => Some(json),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to serialize store response");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientStatus;
    use crate::storage::MemoryStore;

    fn fields(last: &str) -> PatientFields {
        PatientFields {
            first_name: "Sam".into(),
            last_name: last.into(),
            date_of_birth: "5/5/1955".into(),
            address: "3 Hill Lane".into(),
            ..Default::default()
        }
    }

    fn worker() -> StoreWorker {
        StoreWorker::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn insert_is_followed_by_a_snapshot() {
        let mut worker = worker();
        let responses = worker.handle_message(StoreMessage::InsertPatient { fields: fields("Ng") });

        assert_eq!(responses.len(), 2);
        let StoreResponse::PatientInserted { id } = &responses[0] else {
            panic!("expected insert confirmation, got {:?}", responses[0]);
        };
        let StoreResponse::PatientsLoaded { patients } = &responses[1] else {
            panic!("expected snapshot, got {:?}", responses[1]);
        };
        assert_eq!(&patients[0].id, id);
        assert_eq!(patients[0].status, PatientStatus::Inquiry);
    }

    #[test]
    fn failed_update_yields_only_the_error() {
        let mut worker = worker();
        let responses = worker.handle_message(StoreMessage::UpdatePatient {
            id: PatientId::new("ghost"),
            fields: fields("Ng"),
        });

        assert_eq!(responses.len(), 1);
        match &responses[0] {
            StoreResponse::Error { message } => assert!(message.starts_with("update patient:")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn get_of_unknown_id_is_not_an_error() {
        let mut worker = worker();
        let id = PatientId::new("ghost");
        let responses = worker.handle_message(StoreMessage::GetPatient { id: id.clone() });
        assert_eq!(responses, vec![StoreResponse::PatientLoaded { id, patient: None }]);
    }

    #[test]
    fn delete_reports_how_many_existed() {
        let mut worker = worker();
        worker.handle_message(StoreMessage::InsertPatient { fields: fields("Ng") });
        let listed = worker.handle_message(StoreMessage::ListPatients);
        let StoreResponse::PatientsLoaded { patients } = &listed[0] else {
            panic!("expected snapshot");
        };
        let ids = vec![patients[0].id.clone(), PatientId::new("ghost")];

        let responses = worker.handle_message(StoreMessage::DeletePatients { ids: ids.clone() });
        assert_eq!(responses[0], StoreResponse::PatientsDeleted { ids, removed: 1 });
        assert_eq!(responses[1], StoreResponse::PatientsLoaded { patients: vec![] });
    }

    #[test]
    fn payload_bridge_speaks_json() {
        let mut worker = worker();
        let payload = serde_json::to_string(&StoreMessage::ListPatients).unwrap();

        let replies = worker.handle_payload(&payload);
        let response: StoreResponse = serde_json::from_str(&replies[0]).unwrap();
        assert_eq!(response, StoreResponse::PatientsLoaded { patients: vec![] });

        let replies = worker.handle_payload("not json");
        let response: StoreResponse = serde_json::from_str(&replies[0]).unwrap();
        assert!(matches!(response, StoreResponse::Error { .. }));
    }
}
