use std::fmt;

/// Markup the page is willing to inject with `set_inner_html`.
///
/// `Document::set_inner_html` accepts nothing else, so every path that writes
/// HTML into the page has to name where its trust comes from:
///
/// - [`TrustedMarkup::from_backend`] wraps the `/process` payload verbatim. The
///   backend is trusted to return safe HTML; nothing is sanitized.
/// - [`TrustedMarkup::paragraph`] builds markup locally and escapes the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Accept a backend payload as HTML without sanitizing it.
    pub fn from_backend(html: String) -> Self {
        TrustedMarkup(html)
    }

    /// `<p class="..">text</p>` with `text` escaped.
    pub fn paragraph(class: &str, text: &str) -> Self {
        TrustedMarkup(format!(
            "<p class=\"{}\">{}</p>",
            escape_html(class),
            escape_html(text)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn escape_html(text: &str) -> String {
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
