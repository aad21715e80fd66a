//! Create/edit form component renderer.
//!
//! Each field is one line with its label, a `*` when required, the current
//! value and the field name accepted by `set`. A validation message, when
//! present, goes on the line below its field.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormView;

/// Width of the label column, including the required marker.
const LABEL_WIDTH: usize = 16;

pub fn render_form(out: &mut String, form: &FormView, theme: &Theme) {
    out.push('\n');

    for field in &form.fields {
        let label = if field.required {
            format!("{}*", field.label)
        } else {
            field.label.to_string()
        };

        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!(" {label:<LABEL_WIDTH$}"));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&field.value);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!("  [{}]", field.key));
        out.push_str(Theme::reset());
        out.push('\n');

        if let Some(error) = &field.error {
            out.push_str(&Theme::fg(&theme.colors.error_fg));
            out.push_str(&format!(" {:LABEL_WIDTH$}{error}", ""));
            out.push_str(Theme::reset());
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(" Status is one of: {}", form.status_options));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!(" [ {} ]", form.submit_label));
    out.push_str(Theme::reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;
    use crate::ui::viewmodel::FormFieldView;

    #[test]
    fn errors_follow_their_field() {
        let form = FormView {
            title: "New Patient".into(),
            submit_label: "Add Patient".into(),
            fields: vec![
                FormFieldView {
                    key: "firstName",
                    label: "First Name",
                    value: String::new(),
                    required: true,
                    error: Some("First name is required".into()),
                },
                FormFieldView {
                    key: "notes",
                    label: "Notes",
                    value: "vip".into(),
                    required: false,
                    error: None,
                },
            ],
            status_options: "Inquiry | Active".into(),
        };

        let mut out = String::new();
        render_form(&mut out, &form, &Theme::default());
        let text = strip_ansi(&out);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], " First Name*       [firstName]");
        assert_eq!(lines[2], "                 First name is required");
        assert_eq!(lines[3], " Notes           vip  [notes]");
        assert!(text.contains("Status is one of: Inquiry | Active"));
        assert!(text.ends_with(" [ Add Patient ]\n"));
    }
}
