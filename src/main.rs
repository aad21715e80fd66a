//! Command line entry point.
//!
//! Thin integration layer between the roster library and a terminal: reads
//! one command per line from stdin, maps it to an [`Event`], executes the
//! resulting actions against the store worker and prints the re-rendered
//! screen.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Event   ┌──────────────┐ StoreMessage ┌──────────────┐
//! │ stdin lines  │ ───────▶ │ handle_event │ ───────────▶ │ StoreWorker  │
//! └──────────────┘          └──────────────┘              └──────────────┘
//!        ▲                        ▲   │                          │
//!        │ render                 │   └─ AppState                │
//!        └────────────────────────┴──── StoreResponse ◀──────────┘
//! ```
//!
//! # Commands
//!
//! - `filter <text>`: Global fuzzy query (no text clears it)
//! - `where <column> <text>`: Column filter; `unwhere <column>` removes it,
//!   `unwhere` alone clears every filter
//! - `sort <column>`: Cycle ascending, descending, unsorted
//! - `page <n>`, `next`, `prev`, `size <n>`: Paging
//! - `select <n>`, `all`, `none`: Selection by one-based row number
//! - `open <n>`, `back`: Detail page
//! - `new`, `edit`, `set <field> <value>`, `save`, `cancel`: Form
//! - `delete`: Delete the selected rows
//! - `quit`: Exit
//!
//! An empty line re-renders the screen.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use patient_roster::infrastructure::default_log_file;
use patient_roster::storage::{JsonStore, MemoryStore, PatientStore};
use patient_roster::worker::StoreWorker;
use patient_roster::{handle_event, Action, AppState, Config, Event, Result};
use std::collections::{BTreeMap, VecDeque};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Terminal patient roster.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON store to open (created on first save).
    #[arg(long, value_name = "FILE")]
    data_file: Option<String>,

    /// Keep records in memory only.
    #[arg(long)]
    ephemeral: bool,

    /// Rows per table page.
    #[arg(long)]
    page_size: Option<usize>,

    /// Built-in theme name (catppuccin-mocha, catppuccin-latte).
    #[arg(long)]
    theme: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long)]
    trace_level: Option<String>,

    /// Screen height used for rendering.
    #[arg(long, default_value_t = 40)]
    rows: usize,

    /// Screen width used for rendering.
    #[arg(long, default_value_t = 120)]
    cols: usize,
}

impl Cli {
    /// Layers the command line flags over the config file.
    fn config(&self) -> Result<Config> {
        let mut map = match &self.config {
            Some(path) => Config::read_map(path)?,
            None => BTreeMap::new(),
        };

        let overrides = [
            ("data_file", self.data_file.clone()),
            ("page_size", self.page_size.map(|size| size.to_string())),
            ("theme", self.theme.clone()),
            ("trace_level", self.trace_level.clone()),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }

        Ok(Config::from_map(&map))
    }
}

/// Whether the command loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("roster: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;
    patient_roster::observability::init_tracing(&config, &default_log_file());

    let _span = tracing::debug_span!("roster_session", ephemeral = cli.ephemeral).entered();

    let store: Box<dyn PatientStore> = if cli.ephemeral {
        tracing::info!("using in-memory store");
        Box::new(MemoryStore::new())
    } else {
        let path = config.data_path();
        tracing::info!(path = %path.display(), "opening patient store");
        Box::new(JsonStore::new(path)?)
    };

    let mut worker = StoreWorker::new(store);
    let mut app = patient_roster::initialize(&config);

    dispatch(&mut app, &mut worker, Event::Load);
    print_screen(&app, cli)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let flow = match parse_command(&line) {
            Ok(event) => dispatch(&mut app, &mut worker, event),
            Err(message) => {
                app.error(message);
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }
        print_screen(&app, cli)?;
    }

    tracing::info!("roster session ended");
    Ok(())
}

/// Handles `event` and every store response it leads to, in order.
fn dispatch(app: &mut AppState, worker: &mut StoreWorker, event: Event) -> Flow {
    let mut queue = VecDeque::from([event]);

    while let Some(event) = queue.pop_front() {
        let actions = match handle_event(app, &event) {
            Ok((_should_render, actions)) => actions,
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                app.error(e.to_string());
                continue;
            }
        };

        for action in actions {
            match action {
                Action::PostToStore(message) => {
                    queue.extend(worker.handle_message(message).into_iter().map(Event::StoreResponse));
                }
                Action::Quit => return Flow::Quit,
            }
        }
    }

    Flow::Continue
}

fn print_screen(app: &AppState, cli: &Cli) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", patient_roster::ui::render(app, cli.rows, cli.cols))?;
    write!(stdout, "> ")?;
    stdout.flush()
}

/// Maps one input line to an event.
///
/// Row numbers on the command line are one-based; events use zero-based
/// positions.
fn parse_command(line: &str) -> std::result::Result<Event, String> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));
    let (first, tail) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(first, tail)| (first, tail.trim()));

    let event = match command.to_ascii_lowercase().as_str() {
        "" => Event::DismissNotice,
        "filter" | "search" => Event::SetGlobalFilter(rest.to_string()),
        "where" if first.is_empty() => return Err("usage: where <column> <text>".to_string()),
        "where" => Event::SetColumnFilter {
            column: first.to_string(),
            text: tail.to_string(),
        },
        "unwhere" if rest.is_empty() => Event::ClearFilters,
        "unwhere" => Event::ClearColumnFilter(rest.to_string()),
        "sort" if rest.is_empty() => return Err("usage: sort <column>".to_string()),
        "sort" => Event::ToggleSort(rest.to_string()),
        "page" => Event::SetPage(row_number(rest)?),
        "next" => Event::NextPage,
        "prev" | "previous" => Event::PreviousPage,
        "size" => Event::SetPageSize(
            rest.parse()
                .map_err(|_| format!("'{rest}' is not a page size"))?,
        ),
        "select" => Event::ToggleRow(row_number(rest)?),
        "all" => Event::SelectAllOnPage(true),
        "none" => Event::ClearSelection,
        "open" => Event::OpenRow(row_number(rest)?),
        "back" => Event::Back,
        "new" | "add" => Event::NewPatient,
        "edit" => Event::EditPatient,
        "set" if first.is_empty() => return Err("usage: set <field> <value>".to_string()),
        "set" => Event::SetFormField {
            field: first.to_string(),
            value: tail.to_string(),
        },
        "save" => Event::SubmitForm,
        "cancel" => Event::CancelForm,
        "delete" => Event::DeleteSelected,
        "quit" | "exit" => Event::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };

    Ok(event)
}

/// Parses a one-based row or page number into a zero-based index.
fn row_number(text: &str) -> std::result::Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{text}' is not a row number (expected 1, 2, ...)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_command("select 2"), Ok(Event::ToggleRow(1)));
        assert_eq!(parse_command("page 1"), Ok(Event::SetPage(0)));
        assert!(parse_command("open 0").is_err());
        assert!(parse_command("open x").is_err());
    }

    #[test]
    fn filters_keep_their_text() {
        assert_eq!(
            parse_command("filter  mary jones "),
            Ok(Event::SetGlobalFilter("mary jones".into()))
        );
        assert_eq!(parse_command("filter"), Ok(Event::SetGlobalFilter(String::new())));
        assert_eq!(
            parse_command("where lastName  van der"),
            Ok(Event::SetColumnFilter {
                column: "lastName".into(),
                text: "van der".into()
            })
        );
        assert_eq!(parse_command("unwhere"), Ok(Event::ClearFilters));
    }

    #[test]
    fn form_fields_take_the_rest_of_the_line() {
        assert_eq!(
            parse_command("set address 12 Elm Road"),
            Ok(Event::SetFormField {
                field: "address".into(),
                value: "12 Elm Road".into()
            })
        );
        assert!(parse_command("set").is_err());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(parse_command("dance"), Err("unknown command 'dance'".to_string()));
        assert_eq!(parse_command("  "), Ok(Event::DismissNotice));
        assert_eq!(parse_command("QUIT"), Ok(Event::Quit));
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, "page_size = 10\ntheme = \"catppuccin-latte\"\n").unwrap();

        let cli = Cli::parse_from([
            "roster",
            "--config",
            path.to_str().unwrap(),
            "--page-size",
            "5",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn dispatch_runs_store_round_trips() {
        let mut app = patient_roster::initialize(&Config::default());
        let mut worker = StoreWorker::new(Box::new(MemoryStore::new()));

        assert_eq!(dispatch(&mut app, &mut worker, Event::Load), Flow::Continue);
        assert!(app.loaded);
        assert_eq!(dispatch(&mut app, &mut worker, Event::Quit), Flow::Quit);
    }
}
