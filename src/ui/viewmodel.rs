//! View model types representing renderable UI state.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They contain no business logic, only
//! display-ready data.

use crate::table::SortDirection;

/// Complete UI view model for one render.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Pending notice, shown between the header and the body.
    pub notice: Option<NoticeInfo>,

    pub body: ScreenView,

    pub footer: FooterInfo,
}

/// Body of the current screen.
#[derive(Debug, Clone)]
pub enum ScreenView {
    /// The roster has not arrived from the store yet.
    Loading,
    List(ListView),
    Detail(DetailView),
    Form(FormView),
}

/// The patient table with its filter bar and footer lines.
#[derive(Debug, Clone)]
pub struct ListView {
    pub filter_bar: FilterBarInfo,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<DisplayRow>,

    /// Set when the current page has no rows.
    pub empty_state: Option<EmptyState>,

    /// `"N of M row(s) selected."`
    pub selection_summary: String,

    /// `"Page x of y"`
    pub page_summary: String,

    /// Toolbar buttons available for the current selection.
    pub available_actions: Vec<&'static str>,
}

/// Active filters shown above the table.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub query: String,
    /// Whether the query is long enough to filter.
    pub query_active: bool,
    /// `(column label, filter text)` pairs in column order.
    pub column_filters: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ColumnHeader {
    pub label: &'static str,
    pub sort: Option<SortDirection>,
    pub width: usize,
}

/// One patient row of the current page.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    /// One-based position on the page, used by `select <n>` and `open <n>`.
    pub position: usize,
    pub is_selected: bool,
    /// One cell per column, in column order.
    pub cells: Vec<DisplayCell>,
}

#[derive(Debug, Clone)]
pub struct DisplayCell {
    pub text: String,

    /// Character ranges to highlight (for fuzzy search matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices,
    /// end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Shown instead of table rows when nothing matches.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Body of the detail page.
#[derive(Debug, Clone)]
pub enum DetailView {
    Loading,
    Missing { id: String },
    Profile {
        /// First and last name.
        name: String,
        /// `(label, value)` lines under the name.
        fields: Vec<(&'static str, String)>,
    },
}

/// Body of the create/edit form.
#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub submit_label: String,
    pub fields: Vec<FormFieldView>,
    /// Accepted status values, `|`-separated.
    pub status_options: String,
}

#[derive(Debug, Clone)]
pub struct FormFieldView {
    /// Field name accepted by `set`.
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Secondary line under the title; empty for none.
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct NoticeInfo {
    pub message: String,
    pub is_error: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Command hints for the current screen.
    pub keybindings: String,
}
