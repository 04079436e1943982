//! Small HTML building helpers.

use serde_json::Value;

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Percent-encodes a query-string value.
pub fn encode_query_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// `"retrieved_points"` → `"Retrieved points"`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pretty-printed JSON for `<pre>` blocks.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Renders an opaque value for display: maps as definition lists, sequences as lists.
pub fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(&escape_html(s)),
        Value::Bool(b) => out.push_str(if *b { "yes" } else { "no" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(items) => {
            if items.iter().all(is_scalar) {
                let joined: Vec<String> = items.iter().map(scalar_text).collect();
                out.push_str(&escape_html(&joined.join(", ")));
            } else {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    render_value(out, item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
        }
        Value::Object(map) => {
            out.push_str("<dl>");
            for (key, item) in map {
                out.push_str(&format!("<dt>{}</dt><dd>", escape_html(&humanize_key(key))));
                render_value(out, item);
                out.push_str("</dd>");
            }
            out.push_str("</dl>");
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders a list of strings as `<ul>`, or nothing when empty.
pub fn render_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str("<ul>");
    for item in items {
        out.push_str(&format!("<li>{}</li>", escape_html(item)));
    }
    out.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_special_chars() {
        assert_eq!(
            escape_html(r#"<b a="1">Tom & 'Jerry'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn encodes_query_values() {
        assert_eq!(encode_query_value("case-1"), "case-1");
        assert_eq!(encode_query_value("a b&c"), "a%20b%26c");
    }

    #[test]
    fn humanizes_keys() {
        assert_eq!(humanize_key("retrieved_points"), "Retrieved points");
        assert_eq!(humanize_key("hba1c_percent"), "Hba1c percent");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn renders_nested_values() {
        let mut out = String::new();
        render_value(
            &mut out,
            &json!({ "age": 67, "medications": ["a", "b"], "notes": "<x>" }),
        );
        assert!(out.starts_with("<dl>"));
        assert!(out.contains("<dt>Age</dt><dd>67</dd>"));
        assert!(out.contains("<dd>a, b</dd>"));
        assert!(out.contains("&lt;x&gt;"));
    }

    #[test]
    fn renders_sequences_of_records_as_lists() {
        let mut out = String::new();
        render_value(&mut out, &json!([{ "a": 1 }, { "a": 2 }]));
        assert_eq!(out.matches("<li>").count(), 2);
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut out = String::new();
        render_list(&mut out, &[]);
        assert!(out.is_empty());
    }
}
