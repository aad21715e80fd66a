//! The tabular view engine.
//!
//! [`TableView`] owns a [`ViewState`] and turns any record snapshot into the
//! visible page of rows with [`TableView::materialize`]. It never owns or
//! caches the records themselves: the caller passes the current snapshot on
//! every call, and a new vector for the same logical records leaves the view
//! state untouched.
//!
//! # Materialize pipeline
//!
//! 1. **Column filters**: case-insensitive substring match, AND-combined
//! 2. **Global filter**: partial-ratio score of the joined row text, skipped for
//!    short queries
//! 3. **Sort**: stable, text case-insensitive, dates chronological
//! 4. **Paginate**: clamp the page index, slice one window
//! 5. **Selection**: count selected ids inside the matched set and drop ids that
//!    left the record set
//!
//! Every operation is total: unknown input is clamped or ignored, never an
//! error.

use super::column::{ColumnKey, ColumnKind};
use super::score::partial_ratio;
use super::state::{PageState, SortDirection, SortSpec, TableOptions, ViewState};
use crate::domain::{Patient, PatientId};
use std::cmp::Ordering;
use std::collections::HashSet;

/// The derived view of one materialize pass.
///
/// Borrows the rows from the snapshot it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWindow<'a> {
    /// Rows of the current page in display order.
    pub rows: Vec<&'a Patient>,
    /// Number of records passing all filters.
    pub matched_count: usize,
    /// Number of selected ids among the matched records.
    pub selected_count: usize,
    /// `ceil(matched_count / page size)`; zero for an empty match.
    pub page_count: usize,
    /// Clamped zero-based index of the page in `rows`.
    pub page_index: usize,
    /// Selected ids among the matched records, in display order.
    pub selected_ids: Vec<PatientId>,
}

impl TableWindow<'_> {
    /// Detaches the window from the record slice, keeping ids instead of rows.
    #[must_use]
    pub fn to_snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            row_ids: self.rows.iter().map(|patient| patient.id.clone()).collect(),
            matched_count: self.matched_count,
            selected_count: self.selected_count,
            page_count: self.page_count,
            page_index: self.page_index,
            selected_ids: self.selected_ids.clone(),
        }
    }
}

/// Owned form of a [`TableWindow`] that can be stored next to the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub row_ids: Vec<PatientId>,
    pub matched_count: usize,
    pub selected_count: usize,
    pub page_count: usize,
    pub page_index: usize,
    pub selected_ids: Vec<PatientId>,
}

/// Number of pages needed for `matched` rows at `size` rows per page.
#[must_use]
pub const fn page_count(matched: usize, size: usize) -> usize {
    if matched == 0 {
        0
    } else {
        matched.div_ceil(if size == 0 { 1 } else { size })
    }
}

/// Sort, filter, paginate and select over an externally supplied record set.
///
/// # Example
///
/// ```rust
/// use patient_roster::domain::{Patient, PatientFields, PatientId};
/// use patient_roster::table::{ColumnKey, TableOptions, TableView};
///
/// let records: Vec<Patient> = ["Smith", "Jones"]
///     .iter()
///     .enumerate()
///     .map(|(i, last)| {
///         let fields = PatientFields { last_name: (*last).to_string(), ..Default::default() };
///         Patient::from_fields(PatientId::new(i.to_string()), fields, 0)
///     })
///     .collect();
///
/// let mut table = TableView::new(TableOptions::default());
/// table.toggle_sort(ColumnKey::LastName);
/// let window = table.materialize(&records);
/// assert_eq!(window.rows[0].last_name, "Jones");
/// assert_eq!(window.page_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableView {
    state: ViewState,
    options: TableOptions,
    /// Matched count of the last materialize, used to clamp `set_page`.
    last_matched: usize,
    /// Ids on the page of the last materialize, used by `toggle_all_on_page`.
    page_ids: Vec<PatientId>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}

impl TableView {
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        let state = ViewState {
            page: PageState {
                index: 0,
                size: options.page_size.max(1),
            },
            ..ViewState::default()
        };

        Self {
            state,
            options,
            last_matched: 0,
            page_ids: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn options(&self) -> TableOptions {
        self.options
    }

    /// Ids of the rows shown by the last materialize.
    #[must_use]
    pub fn page_ids(&self) -> &[PatientId] {
        &self.page_ids
    }

    /// Replaces the global filter text and returns to the first page.
    ///
    /// Extending a query usually narrows the match, but this is not
    /// guaranteed: the best-window score of [`partial_ratio`] can rise when
    /// a longer query lines up with a longer window.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.state.global_filter = text.into();
        self.state.page.index = 0;
        tracing::trace!(query = %self.state.global_filter, "global filter updated");
    }

    /// Sets or, with an empty `text`, clears the filter of one column.
    pub fn set_column_filter(&mut self, column: ColumnKey, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.state.column_filters.remove(&column);
        } else {
            self.state.column_filters.insert(column, text);
        }
        self.state.page.index = 0;
        tracing::trace!(column = %column, active = self.state.column_filters.len(), "column filter updated");
    }

    /// Clears the global filter and every column filter.
    pub fn clear_filters(&mut self) {
        self.state.global_filter.clear();
        self.state.column_filters.clear();
        self.state.page.index = 0;
    }

    /// Cycles `column` through unsorted, ascending and descending.
    ///
    /// Toggling a column other than the one currently sorted replaces the sort
    /// with that column ascending.
    pub fn toggle_sort(&mut self, column: ColumnKey) {
        let next = match self.sort_direction(column) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        self.state.sort.clear();
        if let Some(direction) = next {
            self.state.sort.push(SortSpec { column, direction });
        }
        self.state.page.index = 0;

        tracing::debug!(column = %column, direction = ?next, "sort toggled");
    }

    /// Direction `column` is currently sorted in, if any.
    #[must_use]
    pub fn sort_direction(&self, column: ColumnKey) -> Option<SortDirection> {
        self.state
            .sort
            .iter()
            .find(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }

    /// Moves to page `index`, clamped against the last materialized match.
    pub fn set_page(&mut self, index: usize) {
        let pages = page_count(self.last_matched, self.state.page.size);
        self.state.page.index = index.min(pages.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page.index.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.state.page.index.saturating_sub(1));
    }

    /// Changes the page size (minimum one row) and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.state.page.size = size.max(1);
        self.state.page.index = 0;
    }

    pub fn toggle_row_selection(&mut self, id: &PatientId) {
        if !self.state.selection.remove(id) {
            self.state.selection.insert(id.clone());
        }
    }

    /// Selects or deselects every row of the last materialized page.
    pub fn toggle_all_on_page(&mut self, selected: bool) {
        for id in &self.page_ids {
            if selected {
                self.state.selection.insert(id.clone());
            } else {
                self.state.selection.remove(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Removes `ids` from the selection, ignoring ids that are not selected.
    pub fn deselect(&mut self, ids: &[PatientId]) {
        for id in ids {
            self.state.selection.remove(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &PatientId) -> bool {
        self.state.selection.contains(id)
    }

    /// Whether the global query is long enough to filter this pass.
    #[must_use]
    pub fn global_filter_active(&self) -> bool {
        self.state.global_filter.chars().count() >= self.options.min_query_len
    }

    /// Computes the visible page for `records` under the current view state.
    ///
    /// Also clamps the stored page index and prunes selected ids that are no
    /// longer in `records`. Calling it twice with the same input yields the
    /// same window.
    pub fn materialize<'a>(&mut self, records: &'a [Patient]) -> TableWindow<'a> {
        let _span = tracing::debug_span!(
            "materialize",
            records = records.len(),
            column_filters = self.state.column_filters.len(),
            global_filter_active = self.global_filter_active(),
            sorted = !self.state.sort.is_empty()
        )
        .entered();

        let mut matched: Vec<&'a Patient> = records
            .iter()
            .filter(|patient| self.matches_column_filters(patient))
            .filter(|patient| self.matches_global_filter(patient))
            .collect();

        if !self.state.sort.is_empty() {
            matched.sort_by(|a, b| self.compare(a, b));
        }

        let size = self.state.page.size.max(1);
        let pages = page_count(matched.len(), size);
        let index = self.state.page.index.min(pages.saturating_sub(1));
        self.state.page.index = index;

        let live: HashSet<&PatientId> = records.iter().map(|patient| &patient.id).collect();
        let before = self.state.selection.len();
        self.state.selection.retain(|id| live.contains(id));
        let pruned = before - self.state.selection.len();

        let selected_ids: Vec<PatientId> = matched
            .iter()
            .filter(|patient| self.state.selection.contains(&patient.id))
            .map(|patient| patient.id.clone())
            .collect();

        let rows: Vec<&'a Patient> = matched.iter().skip(index * size).take(size).copied().collect();

        self.page_ids = rows.iter().map(|patient| patient.id.clone()).collect();
        self.last_matched = matched.len();

        tracing::debug!(
            matched = matched.len(),
            page = index,
            pages = pages,
            selected = selected_ids.len(),
            pruned_selection = pruned,
            "table materialized"
        );

        TableWindow {
            rows,
            matched_count: matched.len(),
            selected_count: selected_ids.len(),
            page_count: pages,
            page_index: index,
            selected_ids,
        }
    }

    fn matches_column_filters(&self, patient: &Patient) -> bool {
        self.state.column_filters.iter().all(|(column, needle)| {
            contains_ignore_case(column.value(patient), needle)
        })
    }

    fn matches_global_filter(&self, patient: &Patient) -> bool {
        if !self.global_filter_active() {
            return true;
        }

        let haystack = ColumnKey::ALL
            .iter()
            .map(|column| column.value(patient))
            .collect::<Vec<_>>()
            .join(" ");

        partial_ratio(&haystack, &self.state.global_filter) > self.options.fuzzy_threshold
    }

    fn compare(&self, a: &Patient, b: &Patient) -> Ordering {
        self.state
            .sort
            .iter()
            .fold(Ordering::Equal, |ordering, spec| {
                ordering.then_with(|| {
                    let by_column = compare_column(spec.column, a, b);
                    match spec.direction {
                        SortDirection::Ascending => by_column,
                        SortDirection::Descending => by_column.reverse(),
                    }
                })
            })
    }
}

fn compare_column(column: ColumnKey, a: &Patient, b: &Patient) -> Ordering {
    match column.kind() {
        ColumnKind::Date => a.birth_date().cmp(&b.birth_date()),
        ColumnKind::Text => column
            .value(a)
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(column.value(b).chars().flat_map(char::to_lowercase)),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
