//! Table component renderer.
//!
//! Renders the patient table: a header row with sort indicators, one line per
//! patient with a selection marker and page position, and the two summary
//! lines underneath.

use crate::table::SortDirection;
use crate::ui::helpers::{self, padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayRow, ListView};

/// Prefix of the header row, as wide as a row's marker and position.
const HEADER_PREFIX: &str = "    #   ";

/// Appends the column header row.
///
/// Sorted columns carry `▲` (ascending) or `▼` (descending) after the label.
pub fn render_table_headers(out: &mut String, columns: &[ColumnHeader], theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(HEADER_PREFIX);

    for column in columns {
        let indicator = match column.sort {
            Some(SortDirection::Ascending) => " ▲",
            Some(SortDirection::Descending) => " ▼",
            None => "",
        };
        let label = truncate(
            column.label,
            column.width.saturating_sub(indicator.chars().count()),
        );
        out.push_str(&label);
        if !indicator.is_empty() {
            out.push_str(&Theme::fg(&theme.colors.sort_indicator_fg));
            out.push_str(indicator);
            out.push_str(&Theme::fg(&theme.colors.header_fg));
        }
        let visible = label.chars().count() + indicator.chars().count();
        out.push_str(&" ".repeat(column.width.saturating_sub(visible) + 1));
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends one line per row.
pub fn render_table_rows(out: &mut String, view: &ListView, theme: &Theme) {
    for row in &view.rows {
        render_table_row(out, row, &view.columns, theme);
    }
}

/// Appends a single patient row.
///
/// # Layout
///
/// ```text
/// [x]  1  Mary        Jones         ...
/// ```
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Fuzzy match highlights (unless selected)
/// 3. Normal text color
fn render_table_row(out: &mut String, row: &DisplayRow, columns: &[ColumnHeader], theme: &Theme) {
    let base = if row.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    out.push_str(&base);
    let marker = if row.is_selected { "[x]" } else { "[ ]" };
    out.push_str(&format!("{marker} {:>2}  ", row.position));

    for (cell, column) in row.cells.iter().zip(columns) {
        let text = truncate(&cell.text, column.width);
        helpers::push_highlighted(
            out,
            &text,
            &cell.highlight_ranges,
            theme,
            row.is_selected,
            &base,
        );
        out.push_str(&" ".repeat(padding(&text, column.width) + 1));
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the selection count with the page position, then the toolbar.
pub fn render_table_summary(out: &mut String, view: &ListView, theme: &Theme, cols: usize) {
    let gap = cols
        .saturating_sub(view.selection_summary.chars().count() + view.page_summary.chars().count() + 2)
        .max(2);

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push(' ');
    out.push_str(&view.selection_summary);
    out.push_str(&" ".repeat(gap));
    out.push_str(&view.page_summary);
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(" Actions: ");
    out.push_str(&view.available_actions.join(" | "));
    out.push_str(Theme::reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;
    use crate::ui::viewmodel::{DisplayCell, FilterBarInfo};

    fn view(selected: bool) -> ListView {
        ListView {
            filter_bar: FilterBarInfo {
                query: String::new(),
                query_active: false,
                column_filters: vec![],
            },
            columns: vec![
                ColumnHeader {
                    label: "First Name",
                    sort: Some(SortDirection::Descending),
                    width: 12,
                },
                ColumnHeader {
                    label: "Last Name",
                    sort: None,
                    width: 6,
                },
            ],
            rows: vec![DisplayRow {
                position: 3,
                is_selected: selected,
                cells: vec![
                    DisplayCell {
                        text: "Mary".into(),
                        highlight_ranges: vec![(0, 2)],
                    },
                    DisplayCell {
                        text: "Jones-Whitaker".into(),
                        highlight_ranges: vec![],
                    },
                ],
            }],
            empty_state: None,
            selection_summary: "0 of 1 row(s) selected.".into(),
            page_summary: "Page 1 of 1".into(),
            available_actions: vec!["Add Patient"],
        }
    }

    #[test]
    fn headers_show_sort_direction() {
        let mut out = String::new();
        render_table_headers(&mut out, &view(false).columns, &Theme::default());
        assert_eq!(strip_ansi(&out), "    #   First Name ▼ Las... \n");
    }

    #[test]
    fn ascending_sort_gets_an_up_arrow() {
        let columns = [
            ColumnHeader {
                label: "First Name",
                sort: None,
                width: 12,
            },
            ColumnHeader {
                label: "Last Name",
                sort: Some(SortDirection::Ascending),
                width: 12,
            },
        ];
        let mut out = String::new();
        render_table_headers(&mut out, &columns, &Theme::default());
        assert_eq!(strip_ansi(&out), "    #   First Name   Last Name ▲  \n");
    }

    #[test]
    fn rows_carry_marker_position_and_truncated_cells() {
        let mut out = String::new();
        render_table_rows(&mut out, &view(true), &Theme::default());
        assert_eq!(strip_ansi(&out), "[x]  3  Mary         Jon... \n");

        let mut out = String::new();
        render_table_rows(&mut out, &view(false), &Theme::default());
        assert!(strip_ansi(&out).starts_with("[ ]  3  Mary"));
    }

    #[test]
    fn summary_lists_counts_and_actions() {
        let mut out = String::new();
        render_table_summary(&mut out, &view(false), &Theme::default(), 60);
        let text = strip_ansi(&out);
        assert!(text.contains("0 of 1 row(s) selected."));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.ends_with(" Actions: Add Patient\n"));
    }
}
