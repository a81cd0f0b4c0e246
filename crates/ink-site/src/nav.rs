//! Sidebar navigation.
//!
//! Entries under the documentation root carry the same internal-link marker
//! as links in rendered markdown, so one click router serves both the
//! sidebar and the page body.

use std::fmt::Write;

use ink_renderer::{INTERNAL_LINK_ATTR, LinkKind, classify_link, escape_html, resolve_internal_path};

use crate::content::{DocsNav, Locale, NavItem};

/// Navigation file at the content root. Not loaded as a page.
pub(crate) const NAV_FILE: &str = "_nav.toml";

/// Page name used in broken-link reports for sidebar entries.
pub const NAV_LINK_SOURCE: &str = "_nav";

/// Path of the page with `slug` under `docs_root`.
///
/// The `index` page lives at the root itself.
///
/// # Example
///
/// ```
/// use ink_site::page_href;
///
/// assert_eq!(page_href("/docs", "sdk/python"), "/docs/sdk/python");
/// assert_eq!(page_href("/docs", "index"), "/docs");
/// assert_eq!(page_href("/", "index"), "/");
/// ```
#[must_use]
pub fn page_href(docs_root: &str, slug: &str) -> String {
    let root = docs_root.trim_end_matches('/');
    match (slug, root) {
        ("index", "") => "/".to_owned(),
        ("index", _) => root.to_owned(),
        _ => format!("{root}/{slug}"),
    }
}

/// Renders the sidebar in one locale.
#[derive(Clone, Copy, Debug)]
pub struct NavRenderer<'a> {
    nav: &'a DocsNav,
    docs_root: &'a str,
    locale: Locale,
}

impl<'a> NavRenderer<'a> {
    #[must_use]
    pub fn new(nav: &'a DocsNav, docs_root: &'a str, locale: Locale) -> Self {
        Self {
            nav,
            docs_root,
            locale,
        }
    }

    /// Render the `<nav>` element.
    ///
    /// The entry whose resolved path (ignoring fragment and query) equals
    /// `current` is marked active.
    #[must_use]
    pub fn render(&self, current: &str) -> String {
        let mut html = String::with_capacity(1024);
        html.push_str("<nav class=\"docs-nav\">\n");
        for section in &self.nav.sections {
            html.push_str("<div class=\"nav-section\">\n");
            writeln!(html, "<h3>{}</h3>", escape_html(section.title.get(self.locale))).unwrap();
            self.write_items(&mut html, &section.items, current);
            html.push_str("</div>\n");
        }
        html.push_str("</nav>");
        html
    }

    fn write_items(&self, html: &mut String, items: &[NavItem], current: &str) {
        if items.is_empty() {
            return;
        }
        html.push_str("<ul>\n");
        for item in items {
            html.push_str("<li>");
            self.write_link(html, item, current);
            if !item.items.is_empty() {
                html.push('\n');
                self.write_items(html, &item.items, current);
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    fn write_link(&self, html: &mut String, item: &NavItem, current: &str) {
        let title = escape_html(item.title.get(self.locale));
        let description = item.description.get(self.locale);
        let tooltip = if description.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(description))
        };

        if classify_link(&item.href, self.docs_root) != LinkKind::Internal {
            let href = escape_html(&item.href);
            write!(
                html,
                r#"<a href="{href}" class="external-link" target="_blank" rel="noopener noreferrer"{tooltip}>{title}</a>"#
            )
            .unwrap();
            return;
        }

        let resolved = resolve_internal_path(&item.href, self.docs_root);
        let is_active = resolved.split(['#', '?']).next() == Some(current);
        let path = escape_html(&resolved);
        if is_active {
            write!(
                html,
                r#"<a href="{path}" class="internal-link active" aria-current="page" {INTERNAL_LINK_ATTR}="{path}"{tooltip}>{title}</a>"#
            )
            .unwrap();
        } else {
            write!(
                html,
                r#"<a href="{path}" class="internal-link" {INTERNAL_LINK_ATTR}="{path}"{tooltip}>{title}</a>"#
            )
            .unwrap();
        }
    }
}
