//! One-shot notice line shown between the header and the screen body.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeInfo;

pub fn render_notice(out: &mut String, notice: &NoticeInfo, theme: &Theme) {
    let (color, prefix) = if notice.is_error {
        (&theme.colors.error_fg, "Error: ")
    } else {
        (&theme.colors.info_fg, "")
    };

    out.push_str(&Theme::fg(color));
    out.push(' ');
    out.push_str(prefix);
    out.push_str(&notice.message);
    out.push_str(Theme::reset());
    out.push('\n');
}
