//! Client-side table engine over an in-memory patient snapshot.
//!
//! # Modules
//!
//! - `column`: typed column keys and field accessors
//! - `score`: partial-ratio fuzzy scorer used by the global filter
//! - `state`: the transient [`ViewState`] and engine options
//! - `engine`: [`TableView`] and its `materialize` pipeline

pub mod column;
pub mod engine;
pub mod score;
pub mod state;

pub use column::{ColumnKey, ColumnKind, UnknownColumn};
pub use engine::{page_count, TableSnapshot, TableView, TableWindow};
pub use score::partial_ratio;
pub use state::{
    PageState, SortDirection, SortSpec, TableOptions, ViewState, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_MIN_QUERY_LEN, DEFAULT_PAGE_SIZE,
};
