//! Shared harness: an application state wired to a store worker, driven the
//! same way the binary drives it.

#![allow(dead_code)]

use patient_roster::app::{handle_event, Action, AppState, Event};
use patient_roster::domain::{Patient, PatientFields, PatientId, PatientStatus};
use patient_roster::storage::{MemoryStore, PatientStore};
use patient_roster::table::TableOptions;
use patient_roster::ui::Theme;
use patient_roster::worker::StoreWorker;
use std::collections::VecDeque;

pub struct Session {
    pub app: AppState,
    pub worker: StoreWorker,
    pub quit: bool,
}

impl Session {
    /// Opens a session on `store` and loads the first snapshot.
    pub fn open(store: Box<dyn PatientStore>, options: TableOptions) -> Self {
        let mut session = Self {
            app: AppState::new(options, Theme::default()),
            worker: StoreWorker::new(store),
            quit: false,
        };
        session.send(Event::Load);
        session
    }

    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self::open(
            Box::new(MemoryStore::with_patients(patients)),
            TableOptions::default(),
        )
    }

    /// Handles `event` and every store response it leads to.
    pub fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_render, actions) = handle_event(&mut self.app, &event).unwrap();
            for action in actions {
                match action {
                    Action::PostToStore(message) => queue.extend(
                        self.worker
                            .handle_message(message)
                            .into_iter()
                            .map(Event::StoreResponse),
                    ),
                    Action::Quit => self.quit = true,
                }
            }
        }
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.send(Event::SetFormField {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    /// Last names of the visible page, in display order.
    pub fn visible_last_names(&self) -> Vec<String> {
        self.app
            .view
            .row_ids
            .iter()
            .filter_map(|id| self.app.patient(id))
            .map(|patient| patient.last_name.clone())
            .collect()
    }

    pub fn notice(&self) -> Option<&str> {
        self.app.notice.as_ref().map(|notice| notice.message.as_str())
    }
}

pub fn patient(id: &str, first: &str, last: &str, dob: &str, status: PatientStatus) -> Patient {
    Patient::from_fields(
        PatientId::new(id),
        PatientFields {
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: dob.into(),
            address: format!("{id} Main Street"),
            status: Some(status),
            ..Default::default()
        },
        0,
    )
}

pub fn smith_and_jones() -> Vec<Patient> {
    vec![
        patient("1", "Peter", "Smith", "1/5/1970", PatientStatus::Active),
        patient("2", "Mary", "Jones", "3/9/1982", PatientStatus::Inquiry),
    ]
}
