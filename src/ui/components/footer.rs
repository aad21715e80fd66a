//! Footer component renderer.

use crate::ui::helpers::{padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Appends the command hint line, centered and dimmed.
///
/// Hints wider than the terminal are truncated so the line never wraps.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let help_text = truncate(&footer.keybindings, cols);
    let free = padding(&help_text, cols);
    let left = free / 2;

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(left));
    out.push_str(&help_text);
    out.push_str(&" ".repeat(free - left));
    out.push_str(Theme::reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn long_hints_are_truncated() {
        let mut out = String::new();
        let footer = FooterInfo {
            keybindings: "back  edit  quit".into(),
        };
        render_footer(&mut out, &footer, &Theme::default(), 10);
        assert_eq!(strip_ansi(&out), "back  e...\n");
    }
}
