//! Link classification and rendering.
//!
//! Three passes run in a fixed order: internal links (target under the
//! documentation root), then external links (`http://` / `https://`), then
//! every remaining `[text](target)`. The generic pattern matches everything
//! the first two do, so it has to run last.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Attribute carrying the resolved path of an internal link.
///
/// The click router looks for this attribute on activated elements.
pub const INTERNAL_LINK_ATTR: &str = "data-internal-href";

static EXTERNAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap());

static GENERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

/// How a link target is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Under the documentation root; routed client-side.
    Internal,
    /// `http://` or `https://` target.
    External,
    /// Anything else; rendered like an external link.
    Generic,
}

/// Classify a link target against the documentation root.
///
/// # Example
///
/// ```
/// use ink_renderer::{LinkKind, classify_link};
///
/// assert_eq!(classify_link("/docs/sdk/python", "/docs"), LinkKind::Internal);
/// assert_eq!(classify_link("https://example.com", "/docs"), LinkKind::External);
/// assert_eq!(classify_link("guides/setup", "/docs"), LinkKind::Generic);
/// ```
#[must_use]
pub fn classify_link(target: &str, docs_root: &str) -> LinkKind {
    if is_under_root(target, docs_root) {
        LinkKind::Internal
    } else if target.starts_with("http://") || target.starts_with("https://") {
        LinkKind::External
    } else {
        LinkKind::Generic
    }
}

fn is_under_root(target: &str, docs_root: &str) -> bool {
    let root = docs_root.trim_end_matches('/');
    if root.is_empty() {
        return target.starts_with('/') && !target.starts_with("//");
    }
    target.strip_prefix(root).is_some_and(|rest| {
        rest.is_empty() || rest.starts_with('/') || rest.starts_with('#') || rest.starts_with('?')
    })
}

/// Resolve an internal link target to the path handed to navigation.
///
/// - `.` segments are dropped and `..` pops a segment, never above the root
/// - a trailing `.md`, `/index` or `/` is removed
/// - `?query` and `#fragment` suffixes are kept as written
///
/// Targets not under `docs_root` are returned unchanged.
///
/// # Examples
///
/// ```
/// use ink_renderer::resolve_internal_path;
///
/// assert_eq!(
///     resolve_internal_path("/docs/guides/../sdk/python.md#install", "/docs"),
///     "/docs/sdk/python#install"
/// );
/// assert_eq!(resolve_internal_path("/docs/", "/docs"), "/docs");
/// ```
#[must_use]
pub fn resolve_internal_path(target: &str, docs_root: &str) -> String {
    if !is_under_root(target, docs_root) {
        return target.to_owned();
    }

    let root = docs_root.trim_end_matches('/');
    let Some(after_root) = target.strip_prefix(root) else {
        return target.to_owned();
    };
    let (rest, suffix) = match after_root.find(['#', '?']) {
        Some(pos) => after_root.split_at(pos),
        None => (after_root, ""),
    };

    let mut segments: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                // Parent of the root is the root
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    if let Some(last) = segments.pop() {
        let last = last.strip_suffix(".md").unwrap_or(last);
        if last != "index" {
            segments.push(last);
        }
    }

    let mut resolved = root.to_owned();
    for segment in segments {
        resolved.push('/');
        resolved.push_str(segment);
    }
    if resolved.is_empty() {
        resolved.push('/');
    }
    resolved.push_str(suffix);
    resolved
}

/// Render a link in the external form (opens outside the current view).
pub(crate) fn external_anchor(text: &str, href: &str) -> String {
    format!(
        r#"<a href="{href}" class="external-link" target="_blank" rel="noopener noreferrer">{text}</a>"#
    )
}

fn internal_anchor(text: &str, path: &str) -> String {
    format!(r#"<a href="{path}" class="internal-link" {INTERNAL_LINK_ATTR}="{path}">{text}</a>"#)
}

/// Compiled link patterns for one documentation root.
#[derive(Debug)]
pub(crate) struct LinkPasses {
    docs_root: String,
    internal_re: Regex,
}

impl LinkPasses {
    pub(crate) fn new(docs_root: &str) -> Self {
        let root = regex::escape(docs_root.trim_end_matches('/'));
        let pattern = format!(r"\[([^\]]+)\]\(({root}(?:[/?#][^)\s]*)?)\)");
        Self {
            docs_root: docs_root.to_owned(),
            internal_re: Regex::new(&pattern).expect("escaped docs root forms a valid pattern"),
        }
    }

    /// Links whose target begins with the documentation root.
    pub(crate) fn internal_pass(&self, text: &str) -> String {
        self.internal_re
            .replace_all(text, |caps: &Captures<'_>| {
                let target = &caps[2];
                if classify_link(target, &self.docs_root) != LinkKind::Internal {
                    return caps[0].to_owned();
                }
                internal_anchor(&caps[1], &resolve_internal_path(target, &self.docs_root))
            })
            .into_owned()
    }
}

/// Links with an `http://` or `https://` target.
pub(crate) fn external_pass(text: &str) -> String {
    EXTERNAL_RE
        .replace_all(text, |caps: &Captures<'_>| external_anchor(&caps[1], &caps[2]))
        .into_owned()
}

/// Any remaining `[text](target)`, rendered in the external form.
pub(crate) fn generic_pass(text: &str) -> String {
    GENERIC_RE
        .replace_all(text, |caps: &Captures<'_>| external_anchor(&caps[1], &caps[2]))
        .into_owned()
}
