//! Structured logging to a rotating file.
//!
//! Stdout carries the rendered screen, so log events go to
//! `<data dir>/roster.log` instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → roster.log (+ 3 backups)
//! ```
//!
//! # Configuration
//!
//! The level filter is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
