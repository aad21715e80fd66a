//! Patient Roster: a terminal patient list backed by a local document store.
//!
//! The roster provides:
//! - A sortable, filterable and paginated patient table
//! - Fuzzy global search with highlighted matches, plus per-column filters
//! - Multi-row selection that survives filtering and snapshot updates
//! - Patient detail pages and a validated create/edit form
//! - Persistent records in a versioned JSON file with atomic writes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command loop (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Table Engine  │   │ Worker Layer  │
//! │ (ui/)         │   │ (table/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - Filters     │   │ - Messages    │
//! │ - Theming     │   │ - Sort/pages  │   │ - Store calls │
//! │ - Components  │   │ - Selection   │   │ - Snapshots   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/), Domain (domain/),              │
//! │  Infrastructure (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Log file
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Patient record types and errors
//! - [`table`]: The tabular view engine (filter, sort, paginate, select)
//! - [`storage`]: Store trait with JSON file and in-memory backends
//! - [`worker`]: Message bridge between the application and the store
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating log file setup
//!
//! # Configuration
//!
//! Settings come from an optional TOML file, overridden by command line
//! flags:
//!
//! ```toml
//! data_file = "~/records/patients.json"
//! page_size = 25
//! fuzzy_threshold = 60
//! min_query_len = 3
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use patient_roster::storage::MemoryStore;
//! use patient_roster::worker::StoreWorker;
//! use patient_roster::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let mut worker = StoreWorker::new(Box::new(MemoryStore::new()));
//!
//! let (_, actions) = handle_event(&mut state, &Event::Load)?;
//! for action in actions {
//!     if let Action::PostToStore(message) = action {
//!         for response in worker.handle_message(message) {
//!             handle_event(&mut state, &Event::StoreResponse(response))?;
//!         }
//!     }
//! }
//! assert!(state.loaded);
//! # Ok::<(), patient_roster::RosterError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod table;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Patient, Result, RosterError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use table::{TableOptions, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_QUERY_LEN, DEFAULT_PAGE_SIZE};

/// Runtime configuration.
///
/// Built from a string map (see [`Config::from_map`]) so every source, the
/// TOML file and the command line alike, goes through the same parsing and
/// fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the JSON store. `~` is expanded.
    ///
    /// Default: `<data dir>/patient-roster/patients.json`
    pub data_file: Option<String>,

    /// Rows per table page. Default: 25
    pub page_size: usize,

    /// Minimum partial-ratio score (0-100) a record must exceed to pass the
    /// global filter. Default: 60
    pub fuzzy_threshold: u8,

    /// Shortest global query that filters; shorter queries match everything.
    /// Default: 3
    pub min_query_len: usize,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Log level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// `RUST_LOG` takes precedence.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            page_size: DEFAULT_PAGE_SIZE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`: positive integer, else 25
    /// - `fuzzy_threshold`: integer 0-100, else 60
    /// - `min_query_len`: integer, else 3
    /// - `data_file`, `theme`, `theme_file`, `trace_level`: taken as is
    ///
    /// Unparseable values fall back to the default for that key only.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use patient_roster::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "10".to_string());
    /// map.insert("fuzzy_threshold".to_string(), "very".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.fuzzy_threshold, 60);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let fuzzy_threshold = config
            .get("fuzzy_threshold")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .filter(|threshold| *threshold <= 100)
            .unwrap_or(DEFAULT_FUZZY_THRESHOLD);

        let min_query_len = config
            .get("min_query_len")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MIN_QUERY_LEN);

        Self {
            data_file: non_empty("data_file"),
            page_size,
            fuzzy_threshold,
            min_query_len,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Loads configuration from a flat TOML file.
    ///
    /// Values may be strings, integers or booleans; tables and arrays are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if the file cannot be read or is not
    /// valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_map(&Self::read_map(path)?))
    }

    /// Reads a TOML config file into the key/value map
    /// [`from_map`](Self::from_map) takes, so callers can layer overrides on
    /// top before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if the file cannot be read or is not
    /// valid TOML.
    pub fn read_map<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RosterError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::parse_toml(&contents)
    }

    /// Flattens a TOML document into the string map [`from_map`](Self::from_map) takes.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] for invalid TOML.
    pub fn parse_toml(contents: &str) -> Result<BTreeMap<String, String>> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| RosterError::Config(format!("failed to parse config TOML: {e}")))?;

        Ok(table
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, text))
            })
            .collect())
    }

    /// Engine settings for the patient table.
    #[must_use]
    pub const fn table_options(&self) -> TableOptions {
        TableOptions {
            page_size: self.page_size,
            fuzzy_threshold: self.fuzzy_threshold,
            min_query_len: self.min_query_len,
        }
    }

    /// Resolved path of the JSON store.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data_file.as_deref().map_or_else(
            infrastructure::default_data_file,
            infrastructure::expand_tilde,
        )
    }

    /// Loads the configured theme: `theme_file` first, then `theme_name`,
    /// then the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|e| {
                tracing::warn!(theme_name = %theme_name, error = %e, "failed to load theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial application state for `config`.
///
/// The roster is empty until the first `PatientsLoaded` response arrives;
/// send [`Event::Load`] to request it.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        page_size = config.page_size,
        fuzzy_threshold = config.fuzzy_threshold,
        min_query_len = config.min_query_len,
        "initializing patient roster"
    );

    AppState::new(config.table_options(), config.load_theme())
}
