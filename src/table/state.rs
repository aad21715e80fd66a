//! Transient view state of one table session.
//!
//! [`ViewState`] holds what the user configured: sort, filters, page and
//! selection. It refers to records only by [`PatientId`] and to columns only
//! by [`ColumnKey`], so a refreshed record set never leaves it pointing at stale
//! objects.

use super::column::ColumnKey;
use crate::domain::PatientId;
use std::collections::{BTreeMap, BTreeSet};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Default global-filter score a row must exceed to stay visible.
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 60;

/// Default number of characters below which the global filter is ignored.
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One entry of the sort sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: ColumnKey,
    pub direction: SortDirection,
}

/// Requested page window. `index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub index: usize,
    pub size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Sort, filter, page and selection configuration of a table session.
///
/// Created fresh per session and mutated only through
/// [`TableView`](super::TableView) operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Ordered sort keys; the first entry is the primary key. Holds at most one
    /// entry when driven through `toggle_sort`.
    pub sort: Vec<SortSpec>,

    /// Active per-column substring filters. Empty filters are never stored.
    pub column_filters: BTreeMap<ColumnKey, String>,

    /// Free-text query fuzzily matched against all columns.
    pub global_filter: String,

    pub page: PageState,

    /// Selected record ids. Survives filtering, sorting and paging.
    pub selection: BTreeSet<PatientId>,
}

/// Tunable knobs of the table engine.
///
/// The threshold and minimum query length are UX parameters, not correctness
/// constraints; they come from [`Config`](crate::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Rows per page for a fresh session.
    pub page_size: usize,
    /// Partial-ratio score (0-100) a row must strictly exceed.
    pub fuzzy_threshold: u8,
    /// Global queries shorter than this many characters match everything.
    pub min_query_len: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}
