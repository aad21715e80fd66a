//! Filter bar component renderer.
//!
//! Renders the global query and any per-column filters inside a bordered box
//! above the table.

use crate::ui::helpers::{padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Horizontal margin for the filter box (spaces on the left and right).
const FILTER_BOX_MARGIN: usize = 1;

/// Appends the filter box.
///
/// # Layout
///
/// ```text
/// [margin] ┌────────────────────────────┐ [margin]
/// [margin] │ Filter: smi                │ [margin]
/// [margin] │ Where: Last Name ~ jo      │ [margin]   (only with column filters)
/// [margin] └────────────────────────────┘ [margin]
/// ```
///
/// A query that is too short to filter is followed by a dimmed
/// `(too short)` hint.
pub fn render_filter_bar(out: &mut String, filters: &FilterBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FILTER_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.filter_bar_border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    let mut query_line = format!(" Filter: {}", filters.query);
    let hint = if filters.query.is_empty() || filters.query_active {
        ""
    } else {
        "  (too short)"
    };
    query_line = truncate(&query_line, inner_width.saturating_sub(hint.chars().count()));
    push_boxed_line(out, &margin, &border, theme, &query_line, hint, inner_width);

    if !filters.column_filters.is_empty() {
        let clauses: Vec<String> = filters
            .column_filters
            .iter()
            .map(|(label, text)| format!("{label} ~ {text}"))
            .collect();
        let where_line = truncate(&format!(" Where: {}", clauses.join(", ")), inner_width);
        push_boxed_line(out, &margin, &border, theme, &where_line, "", inner_width);
    }

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');
}

fn push_boxed_line(
    out: &mut String,
    margin: &str,
    border: &str,
    theme: &Theme,
    text: &str,
    hint: &str,
    inner_width: usize,
) {
    let visible = format!("{text}{hint}");

    out.push_str(margin);
    out.push_str(border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(text);
    if !hint.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(hint);
    }
    out.push_str(&" ".repeat(padding(&visible, inner_width)));
    out.push_str(border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');
}
