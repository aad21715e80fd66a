//! Composable UI component renderers.
//!
//! Each component appends its lines to a shared `String` buffer, so a whole
//! screen is composed before anything reaches the terminal.
//!
//! # Components
//!
//! - [`header`]: Title bar and subtitle
//! - [`notice`]: One-shot confirmation or error line
//! - [`filters`]: Global query and column filter box
//! - [`table`]: Patient rows with sort indicators, selection markers and
//!   summary lines
//! - [`empty`]: Empty state message when the page has no rows
//! - [`detail`]: Patient profile page
//! - [`form`]: Create/edit form
//! - [`footer`]: Command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Notice]          (when pending)
//! [Screen body]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod filters;
mod footer;
mod form;
mod header;
mod notice;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListView, ScreenView, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use form::render_form;
use header::render_header;
use notice::render_notice;
use table::{render_table_headers, render_table_rows, render_table_summary};

/// Appends a horizontal separator spanning the terminal width.
fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends a complete screen for `vm`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, &theme.colors.border, cols);

    if let Some(notice) = &vm.notice {
        render_notice(out, notice, theme);
    }

    match &vm.body {
        ScreenView::Loading => {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(" Loading patients...");
            out.push_str(Theme::reset());
            out.push('\n');
        }
        ScreenView::List(list) => render_list(out, list, theme, cols),
        ScreenView::Detail(detail) => render_detail(out, detail, theme),
        ScreenView::Form(form) => render_form(out, form, theme),
    }

    render_border(out, &theme.colors.border, cols);
    render_footer(out, &vm.footer, theme, cols);
}

/// Renders the list screen body.
///
/// ```text
/// [Filter box]
/// [Table headers]
/// [Table rows | Empty state]
/// [Selection and page summary]
/// [Actions]
/// ```
fn render_list(out: &mut String, list: &ListView, theme: &Theme, cols: usize) {
    render_filter_bar(out, &list.filter_bar, theme, cols);
    render_table_headers(out, &list.columns, theme);

    if let Some(empty) = &list.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        render_table_rows(out, list, theme);
    }

    out.push('\n');
    render_table_summary(out, list, theme, cols);
}
