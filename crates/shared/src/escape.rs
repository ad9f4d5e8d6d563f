//! HTML escaping for rendered fragments.
//!
//! Every piece of user-entered text that ends up inside an HTML fragment goes
//! through [`html`] first, whether it lands in element content or in an
//! attribute value.

/// Escapes the five HTML-significant characters.
pub fn html(text: &str) -> String {
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
