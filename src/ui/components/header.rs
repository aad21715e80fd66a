//! Header component renderer.
//!
//! Renders the screen title centered on its own line, with an optional dimmed
//! subtitle underneath.

use crate::ui::helpers::padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the header title bar, and the subtitle line when there is one.
///
/// # Parameters
///
/// * `out` - Screen buffer
/// * `header` - Title and subtitle text
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// Padding is split evenly on both sides; the left side gets the smaller half
/// when the width is odd.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    push_centered(out, &header.title, cols);
    out.push_str(Theme::reset());
    out.push('\n');

    if !header.subtitle.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        push_centered(out, &header.subtitle, cols);
        out.push_str(Theme::reset());
        out.push('\n');
    }
}

fn push_centered(out: &mut String, text: &str, cols: usize) {
    let free = padding(text, cols);
    let left = free / 2;
    out.push_str(&" ".repeat(left));
    out.push_str(text);
    out.push_str(&" ".repeat(free - left));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn title_is_centered() {
        let mut out = String::new();
        let header = HeaderInfo {
            title: "Patients".into(),
            subtitle: String::new(),
        };
        render_header(&mut out, &header, &Theme::default(), 20);
        assert_eq!(strip_ansi(&out), "      Patients      \n");
    }

    #[test]
    fn subtitle_gets_its_own_line() {
        let mut out = String::new();
        let header = HeaderInfo {
            title: "Patients".into(),
            subtitle: "All of them".into(),
        };
        render_header(&mut out, &header, &Theme::default(), 8);
        assert_eq!(strip_ansi(&out), "Patients\nAll of them\n");
    }
}
