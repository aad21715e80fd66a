//! Patient detail component renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

/// Width of the label column on the profile page.
const LABEL_WIDTH: usize = 12;

/// Appends the profile page: the patient's name, then one labelled line per
/// field. While the record is loading, or once it is known to be gone, a
/// single status line stands in for the profile.
pub fn render_detail(out: &mut String, detail: &DetailView, theme: &Theme) {
    match detail {
        DetailView::Loading => {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(" Loading patient...");
            out.push_str(Theme::reset());
            out.push('\n');
        }
        DetailView::Missing { id } => {
            out.push_str(&Theme::fg(&theme.colors.error_fg));
            out.push_str(&format!(" Patient not found: {id}"));
            out.push_str(Theme::reset());
            out.push('\n');
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(" Type 'back' to return to the list.");
            out.push_str(Theme::reset());
            out.push('\n');
        }
        DetailView::Profile { name, fields } => {
            out.push('\n');
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.header_fg));
            out.push(' ');
            out.push_str(name);
            out.push_str(Theme::reset());
            out.push_str("\n\n");

            for (label, value) in fields {
                out.push_str(&Theme::fg(&theme.colors.text_dim));
                out.push_str(&format!(" {label:<LABEL_WIDTH$}"));
                out.push_str(&Theme::fg(&theme.colors.text_normal));
                out.push_str(value);
                out.push_str(Theme::reset());
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn profile_lists_labelled_fields() {
        let mut out = String::new();
        let detail = DetailView::Profile {
            name: "Mary Jones".into(),
            fields: vec![("Status", "Active".into()), ("Notes", String::new())],
        };
        render_detail(&mut out, &detail, &Theme::default());
        assert_eq!(
            strip_ansi(&out),
            "\n Mary Jones\n\n Status      Active\n Notes       \n"
        );
    }

    #[test]
    fn missing_record_names_the_id() {
        let mut out = String::new();
        render_detail(&mut out, &DetailView::Missing { id: "abc".into() }, &Theme::default());
        assert!(strip_ansi(&out).starts_with(" Patient not found: abc\n"));
    }
}
