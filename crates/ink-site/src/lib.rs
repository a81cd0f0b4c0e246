//! Documentation site loading and static builds.
//!
//! Pages live in `*.toml` files under a content directory, one page per
//! file, each holding localized titles, markdown sections and, on API
//! reference pages, HTTP endpoints. An optional `_nav.toml` at the content
//! root describes the sidebar. [`Site`] loads them, renders them with
//! [`ink_renderer::Renderer`], and writes one standalone HTML file per page
//! plus a `404.html` not-found page.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ink_renderer::Renderer;
//! use ink_site::{Locale, Site};
//!
//! let site = Site::load(Path::new("content"), Renderer::default())?;
//! let report = site.build(Path::new("dist/docs"), Locale::En)?;
//! for link in &report.broken_links {
//!     eprintln!("{}: broken link to {}", link.page, link.target);
//! }
//! # Ok::<(), ink_site::SiteError>(())
//! ```

mod content;
mod error;
mod loader;
mod nav;
mod page;
mod site;

pub use content::{
    ApiEndpoint, ApiParameter, ApiResponse, AuthKind, CodeExample, DocPage, DocSection, DocsNav,
    HttpMethod, Locale, LocalizedString, NavItem, NavSection, RequestBody,
};
pub use error::SiteError;
pub use nav::{NAV_LINK_SOURCE, NavRenderer, page_href};
pub use page::{PageRenderer, RenderedPage, html_document, not_found_article, not_found_title};
pub use site::{BrokenLink, BuildReport, Site};
