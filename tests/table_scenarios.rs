//! The table engine driven end to end through events and the store worker.

mod common;

use common::{patient, smith_and_jones, Session};
use patient_roster::app::Event;
use patient_roster::domain::{PatientId, PatientStatus};
use patient_roster::ui::helpers::strip_ansi;
use patient_roster::ui::render;
use patient_roster::worker::StoreResponse;

#[test]
fn last_name_sort_cycles_through_three_states() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::ToggleSort("lastName".into()));
    assert_eq!(session.visible_last_names(), ["Jones", "Smith"]);

    session.send(Event::ToggleSort("lastName".into()));
    assert_eq!(session.visible_last_names(), ["Smith", "Jones"]);

    session.send(Event::ToggleSort("lastName".into()));
    assert_eq!(session.visible_last_names(), ["Smith", "Jones"]);
    assert!(session.app.table.state().sort.is_empty());
}

#[test]
fn short_global_query_matches_everything() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::SetGlobalFilter("sm".into()));
    assert_eq!(session.app.view.matched_count, 2);

    session.send(Event::SetGlobalFilter("smith".into()));
    assert_eq!(session.app.view.matched_count, 1);
    assert_eq!(session.visible_last_names(), ["Smith"]);
}

#[test]
fn out_of_range_page_is_clamped() {
    let records = (0..30)
        .map(|i| {
            patient(
                &format!("id-{i}"),
                "Pat",
                &format!("Number{i:02}"),
                "1/1/1990",
                PatientStatus::Active,
            )
        })
        .collect();
    let mut session = Session::with_patients(records);

    assert_eq!(session.app.view.page_count, 2);
    assert_eq!(session.app.view.row_ids.len(), 25);

    session.send(Event::SetPage(5));
    assert_eq!(session.app.view.page_index, 1);
    assert_eq!(session.app.view.row_ids.len(), 5);

    session.send(Event::NextPage);
    assert_eq!(session.app.view.page_index, 1);
    session.send(Event::PreviousPage);
    session.send(Event::PreviousPage);
    assert_eq!(session.app.view.page_index, 0);
}

#[test]
fn externally_deleted_selection_is_pruned() {
    let mut session = Session::with_patients(smith_and_jones());

    session.send(Event::ToggleRowById(PatientId::new("2")));
    assert_eq!(session.app.view.selected_count, 1);

    let remaining = vec![session.app.patients[0].clone()];
    session.send(Event::StoreResponse(StoreResponse::PatientsLoaded {
        patients: remaining,
    }));

    assert_eq!(session.app.view.selected_count, 0);
    assert!(!session.app.table.is_selected(&PatientId::new("2")));
}

#[test]
fn filtered_out_selection_is_kept_but_not_counted() {
    let mut session = Session::with_patients(smith_and_jones());
    session.send(Event::SelectAllOnPage(true));

    session.send(Event::SetColumnFilter {
        column: "status".into(),
        text: "active".into(),
    });
    assert_eq!(session.app.view.selected_count, 1);
    assert!(session.app.table.is_selected(&PatientId::new("2")));

    session.send(Event::ClearColumnFilter("status".into()));
    assert_eq!(session.app.view.selected_count, 2);
}

#[test]
fn snapshots_keep_the_view_settings() {
    let mut session = Session::with_patients(smith_and_jones());
    session.send(Event::ToggleSort("firstName".into()));
    session.send(Event::SetPageSize(1));

    let patients = session.app.patients.clone();
    session.send(Event::StoreResponse(StoreResponse::PatientsLoaded { patients }));
    session.send(Event::Load);

    assert_eq!(session.app.table.state().page.size, 1);
    assert_eq!(session.visible_last_names(), ["Jones"]);
    assert_eq!(session.app.view.page_count, 2);
}

#[test]
fn rendered_list_reflects_the_selection() {
    let mut session = Session::with_patients(smith_and_jones());
    session.send(Event::ToggleRow(0));

    let screen = strip_ansi(&render(&session.app, 40, 120));
    assert!(screen.contains("1 of 2 row(s) selected."));
    assert!(screen.contains("Actions: Edit | Delete"));
    assert!(screen.contains("[x]  1  Peter"));
    assert!(screen.contains("[ ]  2  Mary"));
}
