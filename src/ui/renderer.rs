//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! # Example
//!
//! ```rust
//! use patient_roster::app::AppState;
//! use patient_roster::table::TableOptions;
//! use patient_roster::ui::{render, Theme};
//!
//! let state = AppState::new(TableOptions::default(), Theme::default());
//! let screen = render(&state, 24, 80);
//! assert!(screen.contains("Patients"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the current screen to an ANSI-styled string.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// One `\n`-terminated line per screen line. The caller decides where the
/// text goes; nothing is printed here.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::debug_span!("render", screen = state.screen.name(), rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    components::render_screen(&mut out, vm, theme, cols);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Patient, PatientFields, PatientId, PatientStatus};
    use crate::table::{ColumnKey, TableOptions};
    use crate::ui::helpers::strip_ansi;

    fn state_with_roster() -> AppState {
        let mut state = AppState::new(TableOptions::default(), Theme::default());
        state.replace_patients(vec![Patient::from_fields(
            PatientId::new("1"),
            PatientFields {
                first_name: "Mary".into(),
                last_name: "Jones".into(),
                date_of_birth: "3/9/1982".into(),
                address: "2 Main Street".into(),
                status: Some(PatientStatus::Active),
                ..Default::default()
            },
            0,
        )]);
        state
    }

    #[test]
    fn list_screen_shows_rows_and_summaries() {
        let state = state_with_roster();
        let screen = strip_ansi(&render(&state, 40, 120));

        assert!(screen.contains("Patients"));
        assert!(screen.contains("Mary"));
        assert!(screen.contains("0 of 1 row(s) selected."));
        assert!(screen.contains("Page 1 of 1"));
        assert!(screen.contains("Actions: Add Patient"));
    }

    #[test]
    fn empty_page_shows_no_results() {
        let mut state = state_with_roster();
        state.table.set_column_filter(ColumnKey::Status, "churned");
        state.refresh_view();

        let screen = strip_ansi(&render(&state, 40, 120));
        assert!(screen.contains("No results."));
        assert!(screen.contains("Where: Status ~ churned"));
        assert!(!screen.contains("Mary"));
    }

    #[test]
    fn error_notice_is_rendered() {
        let mut state = state_with_roster();
        state.error("store unavailable");
        let screen = strip_ansi(&render(&state, 40, 120));
        assert!(screen.contains("Error: store unavailable"));
    }

    #[test]
    fn lines_fit_the_terminal_width() {
        let state = state_with_roster();
        let screen = strip_ansi(&render(&state, 40, 120));
        assert!(screen.lines().all(|line| line.chars().count() <= 120));
    }
}
