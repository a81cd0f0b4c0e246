//! Rendered markup value and HTML escaping.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::link::INTERNAL_LINK_ATTR;

static INTERNAL_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"{INTERNAL_LINK_ATTR}="([^"]*)""#)).unwrap()
});

/// Rendered markup, meant for trusted, unescaped insertion by the host.
///
/// The renderer never inspects how the host places this value into its
/// document tree; it only guarantees the string contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// Borrow the markup as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the markup and return the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolved paths of every internal link, in document order.
    ///
    /// # Example
    ///
    /// ```
    /// let markup = ink_renderer::render("See [setup](/docs/guides/setup#keys).");
    /// assert_eq!(markup.internal_paths(), vec!["/docs/guides/setup#keys"]);
    /// ```
    #[must_use]
    pub fn internal_paths(&self) -> Vec<&str> {
        INTERNAL_HREF_RE
            .captures_iter(&self.0)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Escape the five HTML-significant characters.
///
/// # Example
///
/// ```
/// use ink_renderer::escape_html;
///
/// assert_eq!(escape_html("Vec<T> & \"x\""), "Vec&lt;T&gt; &amp; &quot;x&quot;");
/// ```
#[must_use]
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
