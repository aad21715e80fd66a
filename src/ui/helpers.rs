//! Shared rendering utilities.
//!
//! All helpers work on character indices, not byte indices, and append to a
//! `String` buffer instead of printing so a whole screen can be built first.
//!
//! # Example
//!
//! ```rust
//! use patient_roster::ui::helpers::{coalesce_indices, truncate};
//!
//! assert_eq!(coalesce_indices(&[0, 1, 2, 5, 6]), vec![(0, 3), (5, 7)]);
//! assert_eq!(truncate("Grace Brewster Murray", 10), "Grace B...");
//! ```

use crate::ui::theme::Theme;

/// Coalesces sorted character indices into `(start, end)` runs, end exclusive.
#[must_use]
pub fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {
                start = Some(idx);
                prev = Some(idx);
            }
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Number of spaces needed to pad `text` to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> usize {
    width.saturating_sub(text.chars().count())
}

/// Appends `text` with the given character ranges highlighted.
///
/// Ranges past the end of `text` are clamped, so ranges computed on the full
/// value still work after truncation. On a selected row highlighting is
/// skipped to keep the selection colors intact.
///
/// # Parameters
///
/// * `out` - Buffer to append to
/// * `text` - The text to render
/// * `ranges` - `(start, end)` character ranges, end exclusive
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the row is selected
/// * `restore` - Escape sequence re-applied after each highlight
pub fn push_highlighted(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start == end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Removes ANSI escape sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for code in chars.by_ref() {
                if code.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }

    plain
}
