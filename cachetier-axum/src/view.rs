//! Minimal HTML rendering of the node cache page.

use cachetier::NodeCachePage;
use cachetier::forms::{FieldKind, FieldView, FormView};

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_field(out: &mut String, field: &FieldView) {
    out.push_str("<div class=\"field\">");
    match field.kind {
        FieldKind::Select => {
            out.push_str(&format!(
                "<label for=\"{0}\">{1}</label><select id=\"{0}\" name=\"{0}\">",
                escape(&field.name),
                escape(&field.label)
            ));
            out.push_str("<option value=\"\"></option>");
            for option in &field.options {
                out.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape(&option.value),
                    if option.selected { " selected" } else { "" },
                    escape(&option.label)
                ));
            }
            out.push_str("</select>");
        }
        FieldKind::Checkbox => {
            out.push_str(&format!(
                "<label><input type=\"checkbox\" name=\"{}\" value=\"1\"{}> {}</label>",
                escape(&field.name),
                if field.checked { " checked" } else { "" },
                escape(&field.label)
            ));
        }
    }
    if let Some(description) = &field.description {
        out.push_str(&format!("<p class=\"description\">{}</p>", escape(description)));
    }
    for error in &field.errors {
        out.push_str(&format!("<span class=\"error\">{}</span>", escape(error)));
    }
    out.push_str("</div>");
}

fn render_form(out: &mut String, form: &FormView) {
    out.push_str("<form method=\"post\">");
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"action\" value=\"{}\">",
        escape(&form.action)
    ));
    for field in &form.fields {
        render_field(out, field);
    }
    out.push_str("<button type=\"submit\">Submit</button></form>");
}

/// Render the assembled page as an HTML document.
pub fn render(page: &NodeCachePage) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html><head><title>");
    out.push_str(&escape(page.node.name()));
    out.push_str("</title></head><body>");
    out.push_str(&format!("<h1>{}</h1>", escape(page.node.name())));

    if let Some(message) = &page.message {
        out.push_str(&format!("<p class=\"banner\">{}</p>", escape(message)));
    }

    out.push_str("<ul class=\"locales\">");
    for locale in &page.locales {
        out.push_str(&format!("<li>{}</li>", escape(locale.as_str())));
    }
    out.push_str("</ul>");

    if let Some(inherited) = &page.inherited {
        out.push_str(&format!("<p class=\"inherited\">{}</p>", escape(inherited)));
    }

    if let Some(headers_form) = &page.headers_form {
        render_form(&mut out, headers_form);
    }
    render_form(&mut out, &page.clear_form);

    out.push_str("</body></html>");
    out
}
