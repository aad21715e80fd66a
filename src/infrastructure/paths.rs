//! Path utilities for the roster's data directory.
//!
//! Everything the roster writes lives under one per-user directory: the
//! patient store (`patients.json`) and the log file (`roster.log`) with its
//! rotated backups.

use std::path::PathBuf;

/// Directory name under the platform data directory.
const APP_DIR: &str = "patient-roster";

/// Returns the data directory for roster storage.
///
/// Resolves to `<platform data dir>/patient-roster`, e.g.
/// `~/.local/share/patient-roster` on Linux. Falls back to
/// `./patient-roster` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the JSON patient store.
#[must_use]
pub fn default_data_file() -> PathBuf {
    get_data_dir().join("patients.json")
}

/// Default location of the log file.
#[must_use]
pub fn default_log_file() -> PathBuf {
    get_data_dir().join("roster.log")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and every path when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use patient_roster::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/lib/roster.json"), PathBuf::from("/var/lib/roster.json"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/roster.json"), home.join("roster.json"));
///     assert_eq!(expand_tilde("~"), home);
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_share_the_data_dir() {
        let dir = get_data_dir();
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(default_data_file().parent(), Some(dir.as_path()));
        assert_eq!(default_log_file().parent(), Some(dir.as_path()));
    }

    #[test]
    fn only_a_leading_tilde_expands() {
        assert_eq!(expand_tilde("data/~x"), PathBuf::from("data/~x"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }
}
