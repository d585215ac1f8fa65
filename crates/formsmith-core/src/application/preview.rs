//! HTML preview of a form schema

use std::fmt;

use crate::domain::field::{FieldKind, FormField};
use crate::domain::schema::FormSchema;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the schema as a standalone `<form>` fragment.
pub fn render_html(schema: &FormSchema) -> String {
    FormPreview(schema).to_string()
}

/// Display adapter producing the preview markup
pub struct FormPreview<'a>(pub &'a FormSchema);

impl fmt::Display for FormPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = self.0;
        writeln!(f, "<section class=\"form-preview\">")?;
        writeln!(f, "  <h2>{}</h2>", escape(&schema.title))?;
        if let Some(description) = schema.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "  <p>{}</p>", escape(description))?;
        }
        writeln!(f, "  <form>")?;
        for field in schema.fields.iter().filter(|field| !field.remove) {
            write_field(f, field)?;
        }
        writeln!(f, "    <button type=\"submit\">{}</button>", escape(&schema.submit_label))?;
        writeln!(f, "  </form>")?;
        writeln!(f, "</section>")
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FormField) -> fmt::Result {
    let name = escape(&field.name);
    let required = if field.is_required() { " required" } else { "" };
    let marker = if field.is_required() { " <span class=\"required\">*</span>" } else { "" };

    writeln!(f, "    <div class=\"field\">")?;
    writeln!(f, "      <label for=\"{}\">{}{}</label>", name, escape(&field.label), marker)?;

    match field.kind {
        FieldKind::Select => {
            writeln!(f, "      <select id=\"{0}\" name=\"{0}\"{1}>", name, required)?;
            writeln!(f, "        <option value=\"\">Select an option</option>")?;
            for option in field.options() {
                writeln!(
                    f,
                    "        <option value=\"{}\">{}</option>",
                    escape(&option.value),
                    escape(&option.label)
                )?;
            }
            writeln!(f, "      </select>")?;
        }
        FieldKind::Radio => {
            for option in field.options() {
                writeln!(
                    f,
                    "      <label><input type=\"radio\" name=\"{}\" value=\"{}\"> {}</label>",
                    name,
                    escape(&option.value),
                    escape(&option.label)
                )?;
            }
        }
        FieldKind::Checkbox => {
            let checked = if field.default_value.unwrap_or(false) { " checked" } else { "" };
            writeln!(
                f,
                "      <label><input type=\"checkbox\" id=\"{0}\" name=\"{0}\"{1}{2}> {3}</label>",
                name,
                required,
                checked,
                escape(&field.label)
            )?;
        }
        FieldKind::Text | FieldKind::Number | FieldKind::Email | FieldKind::Password => {
            let placeholder = field
                .placeholder
                .as_deref()
                .map(|p| format!(" placeholder=\"{}\"", escape(p)))
                .unwrap_or_default();
            writeln!(
                f,
                "      <input type=\"{0}\" id=\"{1}\" name=\"{1}\"{2}{3}>",
                field.kind, name, required, placeholder
            )?;
        }
    }
    writeln!(f, "    </div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::FieldOption;

    #[test]
    fn test_renders_each_kind() {
        let mut schema = FormSchema::new("Order");
        schema.submit_label = "Buy".into();
        schema.fields = vec![
            FormField::new(FieldKind::Email, "mail", "Email").with_required(true).with_placeholder(Some("you@x.io".into())),
            FormField::new(FieldKind::Select, "size", "Size").with_options(vec![FieldOption::new("Large", "l")]),
            FormField::new(FieldKind::Radio, "color", "Color").with_options(vec![FieldOption::new("Blue", "b")]),
            FormField::new(FieldKind::Checkbox, "gift", "Gift wrap").with_default_value(Some(true)),
        ];

        let html = render_html(&schema);
        assert!(html.contains("<h2>Order</h2>"));
        assert!(html.contains("<input type=\"email\" id=\"mail\" name=\"mail\" required placeholder=\"you@x.io\">"));
        assert!(html.contains("Email <span class=\"required\">*</span>"));
        assert!(html.contains("<option value=\"\">Select an option</option>"));
        assert!(html.contains("<option value=\"l\">Large</option>"));
        assert!(html.contains("<input type=\"radio\" name=\"color\" value=\"b\"> Blue"));
        assert!(html.contains("name=\"gift\" checked>"));
        assert!(html.contains("<button type=\"submit\">Buy</button>"));
    }

    #[test]
    fn test_escapes_user_text() {
        let mut schema = FormSchema::new("<script>alert('x')</script>");
        schema.fields = vec![FormField::text("q", "A & B")];
        let html = render_html(&schema);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_skips_removed_fields_and_stale_options() {
        let mut schema = FormSchema::new("T");
        schema.fields = vec![
            FormField::text("gone", "Gone").marked_for_removal(),
            FormField::new(FieldKind::Select, "s", "S")
                .with_options(vec![FieldOption::new("Stale", "stale")])
                .with_kind(FieldKind::Text),
        ];
        let html = render_html(&schema);
        assert!(!html.contains("Gone"));
        assert!(!html.contains("stale"));
        assert!(html.contains("<input type=\"text\" id=\"s\" name=\"s\">"));
    }

    #[test]
    fn test_preview_streams_into_any_writer() {
        let mut schema = FormSchema::new("Stream");
        schema.fields = vec![FormField::text("a", "A")];
        let mut out = String::new();
        std::fmt::Write::write_fmt(&mut out, format_args!("{}", FormPreview(&schema))).unwrap();
        assert_eq!(out, render_html(&schema));
        assert!(out.ends_with("</section>\n"));
    }
}
