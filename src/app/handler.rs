//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user commands and
//! store responses, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the command loop or as store responses
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `TableView` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Table**: filters, sort, paging and selection; list screen only
//! - **Navigation**: `OpenRow`, `OpenPatient`, `Back`, `NewPatient`,
//!   `EditPatient`
//! - **Mutations**: `DeleteSelected`, `SubmitForm`
//! - **Form input**: `SetFormField`, `CancelForm`
//! - **Store**: `StoreResponse` with typed response variants
//!
//! Any user event clears the pending notice first, so notices live for
//! exactly one render.
//!
//! # Example
//!
//! ```rust
//! use patient_roster::app::{handle_event, Action, AppState, Event};
//! use patient_roster::table::TableOptions;
//! use patient_roster::ui::Theme;
//! use patient_roster::worker::StoreMessage;
//!
//! let mut state = AppState::new(TableOptions::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Load)?;
//! assert_eq!(actions, vec![Action::PostToStore(StoreMessage::ListPatients)]);
//! # Ok::<(), patient_roster::domain::RosterError>(())
//! ```

use super::form::{FormMode, PatientForm};
use super::modes::{DetailState, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, RosterError};
use crate::domain::PatientId;
use crate::table::{ColumnKey, TableView};
use crate::worker::{StoreMessage, StoreResponse};
use chrono::NaiveDate;

/// Events triggered by user commands or store responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes them sequentially, so state
/// transitions are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Requests the first roster snapshot from the store.
    Load,

    /// Replaces the global fuzzy query. Resets to the first page.
    SetGlobalFilter(String),
    /// Sets a substring filter on a column, by field name or label.
    ///
    /// Empty text removes the filter.
    SetColumnFilter { column: String, text: String },
    ClearColumnFilter(String),
    /// Clears the global query and every column filter.
    ClearFilters,
    /// Cycles the sort on a column: ascending, descending, unsorted.
    ToggleSort(String),

    /// Jumps to a zero-based page; out of range indices are clamped.
    SetPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(usize),

    /// Toggles selection of the row at a zero-based position on the page.
    ToggleRow(usize),
    ToggleRowById(PatientId),
    /// Selects (`true`) or deselects every row of the current page.
    SelectAllOnPage(bool),
    ClearSelection,

    /// Opens the detail page of the row at a zero-based page position.
    OpenRow(usize),
    /// Opens the detail page of a patient by id, from any screen.
    OpenPatient(PatientId),
    /// Leaves the detail page or the form.
    Back,
    NewPatient,
    /// Edits the single selected row, or the patient on the detail page.
    EditPatient,
    /// Deletes every selected row that passes the current filters.
    DeleteSelected,

    /// Sets one form field, by field name or label.
    SetFormField { field: String, value: String },
    SubmitForm,
    CancelForm,
    DismissNotice,

    /// Wraps a response from the store worker.
    StoreResponse(StoreResponse),

    Quit,
}

impl Event {
    /// Variant name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::SetGlobalFilter(_) => "set_global_filter",
            Self::SetColumnFilter { .. } => "set_column_filter",
            Self::ClearColumnFilter(_) => "clear_column_filter",
            Self::ClearFilters => "clear_filters",
            Self::ToggleSort(_) => "toggle_sort",
            Self::SetPage(_) => "set_page",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::SetPageSize(_) => "set_page_size",
            Self::ToggleRow(_) => "toggle_row",
            Self::ToggleRowById(_) => "toggle_row_by_id",
            Self::SelectAllOnPage(_) => "select_all_on_page",
            Self::ClearSelection => "clear_selection",
            Self::OpenRow(_) => "open_row",
            Self::OpenPatient(_) => "open_patient",
            Self::Back => "back",
            Self::NewPatient => "new_patient",
            Self::EditPatient => "edit_patient",
            Self::DeleteSelected => "delete_selected",
            Self::SetFormField { .. } => "set_form_field",
            Self::SubmitForm => "submit_form",
            Self::CancelForm => "cancel_form",
            Self::DismissNotice => "dismiss_notice",
            Self::StoreResponse(_) => "store_response",
            Self::Quit => "quit",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the screen should be re-rendered, and the actions to execute in
/// order. Invalid commands (unknown column, nothing selected, wrong screen)
/// are not errors: they leave the state alone and raise an error notice.
///
/// # Errors
///
/// Reserved for failures that leave the state unusable; none of the current
/// events produce one.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event name and screen.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = event.name(),
        screen = state.screen.name()
    )
    .entered();

    if !matches!(event, Event::StoreResponse(_)) {
        state.notice = None;
    }

    match event {
        Event::Load => Ok((false, vec![Action::PostToStore(StoreMessage::ListPatients)])),

        Event::SetGlobalFilter(text) => {
            Ok(on_table(state, event, |table| table.set_global_filter(text.as_str())))
        }
        Event::SetColumnFilter { column, text } => {
            let Some(column) = parse_column(state, column) else {
                return Ok((true, vec![]));
            };
            Ok(on_table(state, event, |table| {
                table.set_column_filter(column, text.as_str());
            }))
        }
        Event::ClearColumnFilter(column) => {
            let Some(column) = parse_column(state, column) else {
                return Ok((true, vec![]));
            };
            Ok(on_table(state, event, |table| table.set_column_filter(column, "")))
        }
        Event::ClearFilters => Ok(on_table(state, event, TableView::clear_filters)),
        Event::ToggleSort(column) => {
            let Some(column) = parse_column(state, column) else {
                return Ok((true, vec![]));
            };
            Ok(on_table(state, event, |table| table.toggle_sort(column)))
        }

        Event::SetPage(index) => Ok(on_table(state, event, |table| table.set_page(*index))),
        Event::NextPage => Ok(on_table(state, event, TableView::next_page)),
        Event::PreviousPage => Ok(on_table(state, event, TableView::previous_page)),
        Event::SetPageSize(size) => {
            Ok(on_table(state, event, |table| table.set_page_size(*size)))
        }

        Event::ToggleRow(position) => {
            let Some(id) = page_row(state, *position) else {
                return Ok((true, vec![]));
            };
            Ok(on_table(state, event, |table| table.toggle_row_selection(&id)))
        }
        Event::ToggleRowById(id) => {
            Ok(on_table(state, event, |table| table.toggle_row_selection(id)))
        }
        Event::SelectAllOnPage(selected) => {
            Ok(on_table(state, event, |table| table.toggle_all_on_page(*selected)))
        }
        Event::ClearSelection => Ok(on_table(state, event, TableView::clear_selection)),

        Event::OpenRow(position) => {
            let Some(id) = page_row(state, *position) else {
                return Ok((true, vec![]));
            };
            Ok(open_patient(state, id))
        }
        Event::OpenPatient(id) => Ok(open_patient(state, id.clone())),
        Event::Back => match &state.screen {
            Screen::List => Ok((false, vec![])),
            Screen::Detail(_) => {
                state.screen = Screen::List;
                Ok((true, vec![]))
            }
            Screen::Form(_) => Ok(leave_form(state)),
        },
        Event::NewPatient => {
            if !matches!(state.screen, Screen::List) {
                return Ok(wrong_screen(state, "new"));
            }
            state.screen = Screen::Form(Box::new(PatientForm::create(today())));
            Ok((true, vec![]))
        }
        Event::EditPatient => Ok(edit_patient(state)),
        Event::DeleteSelected => {
            if !matches!(state.screen, Screen::List) {
                return Ok(wrong_screen(state, "delete"));
            }
            let ids = state.selected_matched().to_vec();
            if ids.is_empty() {
                state.error("Select at least one patient to delete");
                return Ok((true, vec![]));
            }

            tracing::debug!(count = ids.len(), "deleting selected patients");
            Ok((false, vec![Action::PostToStore(StoreMessage::DeletePatients { ids })]))
        }

        Event::SetFormField { field, value } => {
            let Some(field) = parse_column(state, field) else {
                return Ok((true, vec![]));
            };
            let Screen::Form(form) = &mut state.screen else {
                return Ok(wrong_screen(state, "set"));
            };
            if let Err(err) = form.set_field(field, value) {
                state.error(notice_text(&err));
            }
            Ok((true, vec![]))
        }
        Event::SubmitForm => Ok(submit_form(state)),
        Event::CancelForm => {
            if matches!(state.screen, Screen::Form(_)) {
                Ok(leave_form(state))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::DismissNotice => Ok((true, vec![])),

        Event::StoreResponse(response) => Ok(handle_store_response(state, response)),

        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Applies a table change on the list screen and re-materializes the page.
fn on_table(
    state: &mut AppState,
    event: &Event,
    change: impl FnOnce(&mut TableView),
) -> (bool, Vec<Action>) {
    if !matches!(state.screen, Screen::List) {
        return wrong_screen(state, event.name());
    }

    change(&mut state.table);
    state.refresh_view();
    (true, vec![])
}

fn wrong_screen(state: &mut AppState, command: &str) -> (bool, Vec<Action>) {
    state.error(format!(
        "'{command}' is not available on the {} screen",
        state.screen.name()
    ));
    (true, vec![])
}

fn parse_column(state: &mut AppState, name: &str) -> Option<ColumnKey> {
    match name.parse::<ColumnKey>() {
        Ok(column) => Some(column),
        Err(err) => {
            tracing::debug!(name, "ignoring unknown column");
            state.error(format!("{err}"));
            None
        }
    }
}

/// Id of the row at a zero-based position of the visible page.
fn page_row(state: &mut AppState, position: usize) -> Option<PatientId> {
    if !matches!(state.screen, Screen::List) {
        wrong_screen(state, "row");
        return None;
    }

    let id = state.row_id(position).cloned();
    if id.is_none() {
        state.error(format!("There is no row {} on this page", position + 1));
    }
    id
}

fn open_patient(state: &mut AppState, id: PatientId) -> (bool, Vec<Action>) {
    tracing::debug!(patient_id = %id, "opening patient");
    state.screen = Screen::Detail(DetailState::Loading(id.clone()));
    (true, vec![Action::PostToStore(StoreMessage::GetPatient { id })])
}

fn edit_patient(state: &mut AppState) -> (bool, Vec<Action>) {
    let form = match &state.screen {
        Screen::List => {
            let [id] = state.selected_matched() else {
                state.error("Select exactly one patient to edit");
                return (true, vec![]);
            };
            match state.patient(id) {
                Some(patient) => PatientForm::edit(patient, false),
                None => {
                    let message = RosterError::NotFound(id.to_string()).to_string();
                    state.error(message);
                    return (true, vec![]);
                }
            }
        }
        Screen::Detail(DetailState::Loaded(patient)) => PatientForm::edit(patient, true),
        Screen::Detail(_) => {
            state.error("The patient is not loaded");
            return (true, vec![]);
        }
        Screen::Form(_) => return wrong_screen(state, "edit"),
    };

    state.screen = Screen::Form(Box::new(form));
    (true, vec![])
}

/// Validates the form and posts the insert or update.
///
/// The form stays open with its field errors when validation fails.
fn submit_form(state: &mut AppState) -> (bool, Vec<Action>) {
    let Screen::Form(form) = &mut state.screen else {
        return wrong_screen(state, "save");
    };

    let fields = match form.submit(today()) {
        Ok(fields) => fields,
        Err(err) => {
            state.error(notice_text(&err));
            return (true, vec![]);
        }
    };

    match form.mode.clone() {
        FormMode::Create => {
            state.screen = Screen::List;
            (true, vec![Action::PostToStore(StoreMessage::InsertPatient { fields })])
        }
        FormMode::Edit {
            id,
            from_detail: true,
        } => {
            state.screen = Screen::Detail(DetailState::Loading(id.clone()));
            (
                true,
                vec![
                    Action::PostToStore(StoreMessage::UpdatePatient {
                        id: id.clone(),
                        fields,
                    }),
                    Action::PostToStore(StoreMessage::GetPatient { id }),
                ],
            )
        }
        FormMode::Edit {
            id,
            from_detail: false,
        } => {
            state.screen = Screen::List;
            (true, vec![Action::PostToStore(StoreMessage::UpdatePatient { id, fields })])
        }
    }
}

/// Leaves the form without saving, back to where it was opened from.
fn leave_form(state: &mut AppState) -> (bool, Vec<Action>) {
    let back_to_detail = match &state.screen {
        Screen::Form(form) => match &form.mode {
            FormMode::Edit {
                id,
                from_detail: true,
            } => Some(id.clone()),
            _ => None,
        },
        _ => None,
    };

    match back_to_detail {
        Some(id) => open_patient(state, id),
        None => {
            state.screen = Screen::List;
            (true, vec![])
        }
    }
}

fn handle_store_response(state: &mut AppState, response: &StoreResponse) -> (bool, Vec<Action>) {
    match response {
        StoreResponse::PatientsLoaded { patients } => {
            if state.loaded && &state.patients == patients {
                tracing::debug!("roster unchanged, skipping render");
                return (false, vec![]);
            }
            state.replace_patients(patients.clone());
            (true, vec![])
        }
        StoreResponse::PatientLoaded { id, patient } => {
            let Screen::Detail(detail) = &state.screen else {
                tracing::debug!(patient_id = %id, "detail closed before load finished");
                return (false, vec![]);
            };
            if detail.id() != id {
                tracing::debug!(patient_id = %id, "stale detail load ignored");
                return (false, vec![]);
            }

            state.screen = Screen::Detail(patient.clone().map_or_else(
                || DetailState::Missing(id.clone()),
                DetailState::Loaded,
            ));
            (true, vec![])
        }
        StoreResponse::PatientInserted { id } => {
            tracing::debug!(patient_id = %id, "patient added");
            state.info("Patient added");
            (true, vec![])
        }
        StoreResponse::PatientUpdated { id } => {
            tracing::debug!(patient_id = %id, "patient saved");
            state.info("Patient saved");
            (true, vec![])
        }
        StoreResponse::PatientsDeleted { ids, removed } => {
            state.table.deselect(ids);
            state.refresh_view();
            state.info(format!("Deleted {removed} patient(s)"));
            (true, vec![])
        }
        StoreResponse::Error { message } => {
            tracing::error!("Store error: {}", message);
            state.error(message.clone());
            (true, vec![])
        }
    }
}

/// Text of a notice raised for `err`: the bare message for validation
/// failures, the full error otherwise.
fn notice_text(err: &RosterError) -> String {
    match err {
        RosterError::Validation { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
