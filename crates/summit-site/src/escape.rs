//! HTML escaping for speaker-provided strings.
//!
//! Speaker names, bios and titles come from a third-party service and end up
//! rendered on the website, so the five HTML metacharacters are escaped
//! before they reach a content file.

/// Escape `&`, `<`, `>`, `"` and `'`.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
