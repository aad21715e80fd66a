//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the running session. It
//! keeps the last record snapshot pushed by the store next to the
//! [`TableView`] engine, and caches the engine's last result as a
//! [`TableSnapshot`] so rendering never has to mutate anything.
//!
//! # State Components
//!
//! - **Patients**: the last full snapshot received from the store
//! - **Table**: sort, filters, page and selection (the engine's `ViewState`)
//! - **View**: the materialized page, refreshed after every change
//! - **Screen**: list, detail or form
//! - **Notice**: a one-shot message shown on the next render
//!
//! # Example
//!
//! ```rust
//! use patient_roster::app::AppState;
//! use patient_roster::table::TableOptions;
//! use patient_roster::ui::Theme;
//!
//! let state = AppState::new(TableOptions::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(40, 120);
//! assert_eq!(viewmodel.header.title, "Patients");
//! ```

use super::form::PatientForm;
use super::modes::{DetailState, Screen};
use crate::domain::{Patient, PatientId};
use crate::table::{ColumnKey, TableOptions, TableSnapshot, TableView};
use crate::ui::helpers::coalesce_indices;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnHeader, DetailView, DisplayCell, DisplayRow, EmptyState, FilterBarInfo, FooterInfo,
    FormFieldView, FormView, HeaderInfo, ListView, NoticeInfo, ScreenView, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashMap;

/// Lines taken by everything on the list screen except the table rows.
const LIST_CHROME_ROWS: usize = 12;

/// Width of the selection marker and row number in front of each row.
pub const ROW_PREFIX_WIDTH: usize = 8;

/// Preferred width of each column, in [`ColumnKey::ALL`] order. Notes take
/// whatever is left.
const COLUMN_WIDTHS: [usize; 6] = [12, 14, 12, 13, 26, 11];

/// Narrowest notes column before the table overflows the terminal.
const MIN_NOTES_WIDTH: usize = 8;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message shown once, on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last full roster pushed by the store, in insertion order.
    pub patients: Vec<Patient>,

    /// Whether the first snapshot has arrived. Until then the list shows a
    /// loading state instead of "No results.".
    pub loaded: bool,

    pub table: TableView,

    /// Result of the last materialize. Refreshed by
    /// [`refresh_view`](Self::refresh_view).
    pub view: TableSnapshot,

    pub screen: Screen,

    pub theme: Theme,

    /// Recoverable error or confirmation, cleared by the next user event.
    pub notice: Option<Notice>,
}

impl AppState {
    /// Creates an empty state on the list screen.
    #[must_use]
    pub fn new(options: TableOptions, theme: Theme) -> Self {
        Self {
            patients: Vec::new(),
            loaded: false,
            table: TableView::new(options),
            view: TableSnapshot::default(),
            screen: Screen::List,
            theme,
            notice: None,
        }
    }

    /// Re-runs the table engine against the current snapshot.
    pub fn refresh_view(&mut self) {
        self.view = self.table.materialize(&self.patients).to_snapshot();
    }

    /// Replaces the record snapshot, keeping every view setting.
    ///
    /// A detail page that is already showing a record follows the new
    /// snapshot, and turns into "not found" when its record was deleted.
    pub fn replace_patients(&mut self, patients: Vec<Patient>) {
        tracing::debug!(
            previous = self.patients.len(),
            incoming = patients.len(),
            "roster snapshot replaced"
        );

        self.patients = patients;
        self.loaded = true;
        self.refresh_view();

        if let Screen::Detail(DetailState::Loaded(shown)) = &self.screen {
            let next = self.patient(&shown.id).cloned().map_or_else(
                || DetailState::Missing(shown.id.clone()),
                DetailState::Loaded,
            );
            self.screen = Screen::Detail(next);
        }
    }

    #[must_use]
    pub fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.iter().find(|patient| &patient.id == id)
    }

    /// Id of the row at zero-based `position` on the current page.
    #[must_use]
    pub fn row_id(&self, position: usize) -> Option<&PatientId> {
        self.view.row_ids.get(position)
    }

    /// Selected ids among the rows that pass the current filters.
    #[must_use]
    pub fn selected_matched(&self) -> &[PatientId] {
        &self.view.selected_ids
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, "error notice raised");
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height; caps how many table rows are listed
    /// * `cols` - Terminal width; the notes column absorbs the slack
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let (header, body, keybindings) = match &self.screen {
            Screen::List => (
                HeaderInfo {
                    title: "Patients".to_string(),
                    subtitle: "This is a list of all the patients in the system.".to_string(),
                },
                if self.loaded {
                    ScreenView::List(self.compute_list(rows, cols))
                } else {
                    ScreenView::Loading
                },
                "filter <text>  where <column> <text>  sort <column>  select <n>  all  none  open <n>  next  prev  new  edit  delete  quit",
            ),
            Screen::Detail(detail) => (
                HeaderInfo {
                    title: "Patient Profile".to_string(),
                    subtitle: String::new(),
                },
                ScreenView::Detail(Self::compute_detail(detail)),
                "back  edit  quit",
            ),
            Screen::Form(form) => (
                HeaderInfo {
                    title: form.title().to_string(),
                    subtitle: "Fields marked * are required.".to_string(),
                },
                ScreenView::Form(Self::compute_form(form)),
                "set <field> <value>  save  cancel",
            ),
        };

        UIViewModel {
            header,
            notice: self.notice.as_ref().map(|notice| NoticeInfo {
                message: notice.message.clone(),
                is_error: notice.level == NoticeLevel::Error,
            }),
            body,
            footer: FooterInfo {
                keybindings: keybindings.to_string(),
            },
        }
    }

    fn compute_list(&self, rows: usize, cols: usize) -> ListView {
        let _span = tracing::debug_span!("compute_list", page_rows = self.view.row_ids.len()).entered();

        let widths = column_widths(cols);
        let columns = ColumnKey::ALL
            .iter()
            .zip(widths)
            .map(|(column, width)| ColumnHeader {
                label: column.label(),
                sort: self.table.sort_direction(*column),
                width,
            })
            .collect();

        let matcher = self
            .table
            .global_filter_active()
            .then(SkimMatcherV2::default);
        let query = &self.table.state().global_filter;

        let by_id: HashMap<&PatientId, &Patient> =
            self.patients.iter().map(|patient| (&patient.id, patient)).collect();

        let capacity = rows.saturating_sub(LIST_CHROME_ROWS).max(1);
        let display_rows: Vec<DisplayRow> = self
            .view
            .row_ids
            .iter()
            .take(capacity)
            .enumerate()
            .filter_map(|(position, id)| {
                let patient = by_id.get(id)?;
                Some(DisplayRow {
                    position: position + 1,
                    is_selected: self.table.is_selected(id),
                    cells: ColumnKey::ALL
                        .iter()
                        .map(|column| compute_cell(column.value(patient), query, matcher.as_ref()))
                        .collect(),
                })
            })
            .collect();

        let hidden = self.view.row_ids.len().saturating_sub(capacity);

        let empty_state = self.view.row_ids.is_empty().then(|| EmptyState {
            message: "No results.".to_string(),
            subtitle: if self.patients.is_empty() {
                "Type 'new' to add the first patient.".to_string()
            } else {
                "No patient matches the current filters.".to_string()
            },
        });

        let state = self.table.state();
        let filter_bar = FilterBarInfo {
            query: state.global_filter.clone(),
            query_active: self.table.global_filter_active(),
            column_filters: state
                .column_filters
                .iter()
                .map(|(column, text)| (column.label().to_string(), text.clone()))
                .collect(),
        };

        let selected = self.view.selected_count;
        let mut available_actions = Vec::new();
        if selected == 1 {
            available_actions.push("Edit");
        }
        if selected > 0 {
            available_actions.push("Delete");
        }
        if selected == 0 {
            available_actions.push("Add Patient");
        }

        let mut page_summary = format!(
            "Page {} of {}",
            self.view.page_index + 1,
            self.view.page_count.max(1)
        );
        if hidden > 0 {
            page_summary.push_str(&format!("  ({hidden} more on this page)"));
        }

        ListView {
            filter_bar,
            columns,
            rows: display_rows,
            empty_state,
            selection_summary: format!(
                "{selected} of {} row(s) selected.",
                self.view.matched_count
            ),
            page_summary,
            available_actions,
        }
    }

    fn compute_detail(detail: &DetailState) -> DetailView {
        match detail {
            DetailState::Loading(_) => DetailView::Loading,
            DetailState::Missing(id) => DetailView::Missing { id: id.to_string() },
            DetailState::Loaded(patient) => DetailView::Profile {
                name: format!("{} {}", patient.first_name, patient.last_name),
                fields: vec![
                    ("Birth Date", patient.birth_date_long()),
                    ("Address", patient.address.clone()),
                    ("Status", patient.status.to_string()),
                    ("Notes", patient.notes.clone().unwrap_or_default()),
                ],
            },
        }
    }

    fn compute_form(form: &PatientForm) -> FormView {
        let fields = ColumnKey::ALL
            .iter()
            .map(|field| FormFieldView {
                key: field.key(),
                label: field.label(),
                value: form.value(*field).to_string(),
                required: PatientForm::is_required(*field),
                error: form.errors.get(field).cloned(),
            })
            .collect();

        FormView {
            title: form.title().to_string(),
            submit_label: form.submit_label().to_string(),
            fields,
            status_options: crate::domain::PatientStatus::ALL
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// Splits `cols` between the seven columns after the row prefix.
#[must_use]
pub fn column_widths(cols: usize) -> [usize; 7] {
    let fixed: usize = COLUMN_WIDTHS.iter().sum::<usize>() + ColumnKey::ALL.len();
    let notes = cols
        .saturating_sub(ROW_PREFIX_WIDTH + fixed)
        .max(MIN_NOTES_WIDTH);

    let mut widths = [0; 7];
    widths[..6].copy_from_slice(&COLUMN_WIDTHS);
    widths[6] = notes;
    widths
}

fn compute_cell(text: &str, query: &str, matcher: Option<&SkimMatcherV2>) -> DisplayCell {
    use fuzzy_matcher::FuzzyMatcher;

    let highlight_ranges = matcher
        .and_then(|m| m.fuzzy_indices(text, query))
        .map(|(_score, indices)| coalesce_indices(&indices))
        .unwrap_or_default();

    DisplayCell {
        text: text.to_string(),
        highlight_ranges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientFields, PatientStatus};

    fn patient(id: &str, first: &str, last: &str) -> Patient {
        Patient::from_fields(
            PatientId::new(id),
            PatientFields {
                first_name: first.into(),
                last_name: last.into(),
                date_of_birth: "4/2/1985".into(),
                address: "1 Main St".into(),
                status: Some(PatientStatus::Active),
                ..Default::default()
            },
            0,
        )
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(TableOptions::default(), Theme::default());
        state.replace_patients(vec![patient("1", "John", "Smith"), patient("2", "Mary", "Jones")]);
        state
    }

    fn list(vm: &UIViewModel) -> &ListView {
        match &vm.body {
            ScreenView::List(list) => list,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn list_is_loading_until_the_first_snapshot() {
        let state = AppState::new(TableOptions::default(), Theme::default());
        assert!(matches!(state.compute_viewmodel(40, 120).body, ScreenView::Loading));
    }

    #[test]
    fn footer_counts_and_actions_follow_the_selection() {
        let mut state = loaded_state();

        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(list(&vm).selection_summary, "0 of 2 row(s) selected.");
        assert_eq!(list(&vm).available_actions, ["Add Patient"]);

        state.table.toggle_row_selection(&PatientId::new("1"));
        state.refresh_view();
        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(list(&vm).selection_summary, "1 of 2 row(s) selected.");
        assert_eq!(list(&vm).available_actions, ["Edit", "Delete"]);
        assert!(list(&vm).rows[0].is_selected);
    }

    #[test]
    fn global_query_highlights_matching_cells() {
        let mut state = loaded_state();
        state.table.set_global_filter("smith");
        state.refresh_view();

        let vm = state.compute_viewmodel(40, 120);
        let rows = &list(&vm).rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[1].text, "Smith");
        assert_eq!(rows[0].cells[1].highlight_ranges, vec![(0, 5)]);
    }

    #[test]
    fn empty_match_shows_no_results() {
        let mut state = loaded_state();
        state.table.set_column_filter(ColumnKey::LastName, "zzz");
        state.refresh_view();

        let vm = state.compute_viewmodel(40, 120);
        let empty = list(&vm).empty_state.as_ref().unwrap();
        assert_eq!(empty.message, "No results.");
        assert_eq!(list(&vm).page_summary, "Page 1 of 1");
    }

    #[test]
    fn short_terminals_list_fewer_rows() {
        let mut state = AppState::new(TableOptions::default(), Theme::default());
        state.replace_patients((0..20).map(|i| patient(&i.to_string(), "Pat", "Doe")).collect());

        let vm = state.compute_viewmodel(LIST_CHROME_ROWS + 5, 120);
        assert_eq!(list(&vm).rows.len(), 5);
        assert!(list(&vm).page_summary.contains("15 more on this page"));
    }

    #[test]
    fn shown_detail_follows_new_snapshots() {
        let mut state = loaded_state();
        state.screen = Screen::Detail(DetailState::Loaded(patient("2", "Mary", "Jones")));

        state.replace_patients(vec![patient("2", "Mary", "Smith-Jones")]);
        match &state.screen {
            Screen::Detail(DetailState::Loaded(shown)) => assert_eq!(shown.last_name, "Smith-Jones"),
            other => panic!("unexpected screen {other:?}"),
        }

        state.replace_patients(vec![]);
        assert_eq!(state.screen, Screen::Detail(DetailState::Missing(PatientId::new("2"))));
    }

    #[test]
    fn notes_column_takes_the_slack() {
        assert_eq!(column_widths(0)[6], MIN_NOTES_WIDTH);
        let wide = column_widths(200);
        let used: usize = wide.iter().sum::<usize>() + 7 + ROW_PREFIX_WIDTH;
        assert_eq!(used, 200);
    }
}
