//! Empty state component renderer.
//!
//! Shown in place of table rows when the current page has nothing to list,
//! either because the roster is empty or because the filters exclude every
//! record.

use crate::ui::helpers::padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank lines above the message.
const TOP_MARGIN: usize = 2;

/// Appends the centered two-line empty state message.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// The message uses `empty_state_fg`, the subtitle `text_dim` with dim
/// styling.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    for _ in 0..TOP_MARGIN {
        out.push('\n');
    }

    let msg_padding = padding(&empty.message, cols) / 2;
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(msg_padding));
    out.push_str(&empty.message);
    out.push_str(Theme::reset());
    out.push('\n');

    let sub_padding = padding(&empty.subtitle, cols) / 2;
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(sub_padding));
    out.push_str(&empty.subtitle);
    out.push_str(Theme::reset());
    out.push('\n');
}
