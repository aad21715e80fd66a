//! Create, edit, delete and detail flows against real stores.

mod common;

use common::{smith_and_jones, Session};
use patient_roster::app::{DetailState, Event, FormMode, NoticeLevel, Screen};
use patient_roster::domain::{PatientId, PatientStatus};
use patient_roster::storage::JsonStore;
use patient_roster::table::{ColumnKey, TableOptions};
use patient_roster::ui::helpers::strip_ansi;
use patient_roster::ui::render;
use patient_roster::worker::StoreMessage;

fn fill_in_ada(session: &mut Session) {
    session.set("firstName", "Ada");
    session.set("lastName", "Lovelace");
    session.set("dateOfBirth", "12/10/1915");
    session.set("address", "12 St James's Square");
    session.set("status", "onboarding");
}

#[test]
fn adding_a_patient_returns_to_the_list() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::NewPatient);
    assert!(matches!(&session.app.screen, Screen::Form(form) if form.mode == FormMode::Create));

    fill_in_ada(&mut session);
    session.send(Event::SubmitForm);

    assert_eq!(session.app.screen, Screen::List);
    assert_eq!(session.notice(), Some("Patient added"));
    assert_eq!(session.app.patients.len(), 3);
    assert_eq!(session.app.view.matched_count, 3);

    let ada = session
        .app
        .patients
        .iter()
        .find(|patient| patient.last_name == "Lovelace")
        .unwrap();
    assert_eq!(ada.status, PatientStatus::Onboarding);
    assert_eq!(ada.date_of_birth, "12/10/1915");
    assert!(!ada.id.as_str().is_empty());
}

#[test]
fn editing_the_selected_row_saves_in_place() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::ToggleRowById(PatientId::new("1")));
    session.send(Event::EditPatient);
    session.set("status", "churned");
    session.send(Event::SubmitForm);

    assert_eq!(session.app.screen, Screen::List);
    assert_eq!(session.notice(), Some("Patient saved"));
    let smith = session.app.patient(&PatientId::new("1")).unwrap();
    assert_eq!(smith.status, PatientStatus::Churned);
    assert_eq!(smith.first_name, "Peter");
    assert_eq!(session.app.patients.len(), 2);
}

#[test]
fn editing_from_the_detail_page_reloads_the_profile() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::OpenRow(1));
    assert!(matches!(
        &session.app.screen,
        Screen::Detail(DetailState::Loaded(patient)) if patient.last_name == "Jones"
    ));

    session.send(Event::EditPatient);
    session.set("notes", "Prefers morning visits");
    session.send(Event::SubmitForm);

    match &session.app.screen {
        Screen::Detail(DetailState::Loaded(patient)) => {
            assert_eq!(patient.id, PatientId::new("2"));
            assert_eq!(patient.notes.as_deref(), Some("Prefers morning visits"));
        }
        other => panic!("expected the loaded profile, got {other:?}"),
    }
    assert_eq!(session.notice(), Some("Patient saved"));

    session.send(Event::Back);
    assert_eq!(session.app.screen, Screen::List);
}

#[test]
fn cancelling_an_edit_changes_nothing() {
    let mut session = Session::with_patients(smith_and_jones());
    let before = session.app.patients.clone();

    session.send(Event::OpenRow(0));
    session.send(Event::EditPatient);
    session.set("lastName", "Smythe");
    session.send(Event::CancelForm);

    assert!(matches!(session.app.screen, Screen::Detail(DetailState::Loaded(_))));
    assert_eq!(session.app.patients, before);
}

#[test]
fn deleting_the_selection_empties_the_table() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::SelectAllOnPage(true));
    session.send(Event::DeleteSelected);

    assert_eq!(session.notice(), Some("Deleted 2 patient(s)"));
    assert!(session.app.patients.is_empty());
    assert!(session.app.table.state().selection.is_empty());
    assert_eq!(session.app.view.page_count, 0);

    let screen = strip_ansi(&render(&session.app, 40, 120));
    assert!(screen.contains("No results."));
}

#[test]
fn deleting_without_a_selection_is_refused() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::DeleteSelected);

    assert_eq!(session.notice(), Some("Select at least one patient to delete"));
    assert_eq!(session.app.patients.len(), 2);
}

#[test]
fn unknown_patient_shows_the_missing_page() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::OpenPatient(PatientId::new("ghost")));

    assert_eq!(
        session.app.screen,
        Screen::Detail(DetailState::Missing(PatientId::new("ghost")))
    );
    let screen = strip_ansi(&render(&session.app, 40, 120));
    assert!(screen.contains("Patient not found: ghost"));
}

#[test]
fn invalid_form_stays_open_with_the_error() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::NewPatient);
    fill_in_ada(&mut session);
    session.set("dateOfBirth", "1/1/1899");
    session.send(Event::SubmitForm);

    assert_eq!(session.notice(), Some("Date of birth cannot be before 1/1/1900"));
    match &session.app.screen {
        Screen::Form(form) => {
            assert_eq!(
                form.errors[&ColumnKey::DateOfBirth],
                "Date of birth cannot be before 1/1/1900"
            );
        }
        other => panic!("expected the form, got {other:?}"),
    }
    assert_eq!(session.app.patients.len(), 2);
}

#[test]
fn birth_dates_in_the_future_are_rejected() {
    let mut session = Session::with_patients(smith_and_jones());
    let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);

    session.send(Event::NewPatient);
    fill_in_ada(&mut session);
    session.set("dateOfBirth", &tomorrow.format("%-m/%-d/%Y").to_string());
    session.send(Event::SubmitForm);

    assert_eq!(session.notice(), Some("Date of birth cannot be in the future"));
    assert!(matches!(session.app.screen, Screen::Form(_)));
}

#[test]
fn store_failures_surface_as_error_notices() {
    let mut session = Session::with_patients(smith_and_jones());
    session.send(Event::ToggleRowById(PatientId::new("1")));
    session.send(Event::EditPatient);

    // Another client removes the record while the form is open.
    let _ = session.worker.handle_message(StoreMessage::DeletePatients {
        ids: vec![PatientId::new("1")],
    });
    session.send(Event::SubmitForm);

    let notice = session.app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "update patient: Patient not found: 1");
    assert_eq!(session.app.screen, Screen::List);
}

#[test]
fn json_store_keeps_records_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.json");

    {
        let store = JsonStore::new(path.clone()).unwrap();
        let mut session = Session::open(Box::new(store), TableOptions::default());
        session.send(Event::NewPatient);
        fill_in_ada(&mut session);
        session.send(Event::SubmitForm);
        assert_eq!(session.notice(), Some("Patient added"));
    }

    let store = JsonStore::new(path).unwrap();
    let session = Session::open(Box::new(store), TableOptions::default());

    assert_eq!(session.app.patients.len(), 1);
    let ada = &session.app.patients[0];
    assert_eq!(ada.first_name, "Ada");
    assert_eq!(ada.address, "12 St James's Square");
    assert_eq!(ada.status, PatientStatus::Onboarding);
}
