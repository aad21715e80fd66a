//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level filter used when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters events by `RUST_LOG`, else `config.trace_level`, else `info`
/// 2. Formats them as plain text lines without ANSI colors
/// 3. Writes them to `log_file`, rotating at 10 MB with 3 backups
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Returns silently if that fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use patient_roster::observability::init_tracing;
/// use patient_roster::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config, &dir.path().join("roster.log"));
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config, log_file: &Path) {
    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(log_file.to_path_buf()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
