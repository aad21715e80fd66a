//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the roster keeps its data and logs, and expands
//! user-supplied paths.

pub mod paths;

pub use paths::{default_data_file, default_log_file, expand_tilde, get_data_dir};
