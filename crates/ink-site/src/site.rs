//! Loaded documentation site and static build.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ink_renderer::{LinkKind, Renderer, classify_link, resolve_internal_path};
use rayon::prelude::*;

use crate::SiteError;
use crate::content::{DocPage, DocsNav, Locale};
use crate::loader::{load_nav, load_pages};
use crate::nav::{NAV_LINK_SOURCE, NavRenderer, page_href};
use crate::page::{PageRenderer, RenderedPage, html_document, not_found_article, not_found_title};

/// Slug of the not-found page.
const NOT_FOUND_SLUG: &str = "404";

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Internal link whose target is not a known page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenLink {
    /// Slug of the page containing the link, or `_nav` for sidebar entries.
    pub page: String,
    /// Resolved link target.
    pub target: String,
}

/// Outcome of [`Site::build`].
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written files, in page order.
    pub written: Vec<PathBuf>,
    /// Renderer warnings, prefixed with the page slug.
    pub warnings: Vec<String>,
    pub broken_links: Vec<BrokenLink>,
    /// Generated not-found page, unless the content provides its own `404`.
    pub not_found: Option<PathBuf>,
}

/// All pages of the documentation site.
///
/// Pages are rendered on the rayon global pool with one shared [`Renderer`].
#[derive(Debug)]
pub struct Site {
    pages: Vec<DocPage>,
    by_slug: HashMap<String, usize>,
    nav: Option<DocsNav>,
    renderer: Renderer,
}

impl Site {
    /// Load every page under `content_dir`, and the sidebar from its
    /// `_nav.toml` if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if a page or navigation file cannot be read or
    /// parsed, or two pages share a slug.
    pub fn load(content_dir: &Path, renderer: Renderer) -> Result<Self, SiteError> {
        let start = Instant::now();
        let mut site = Self::from_pages(load_pages(content_dir)?, renderer)?;
        site.nav = load_nav(content_dir)?;
        tracing::info!(
            page_count = site.pages.len(),
            has_nav = site.nav.is_some(),
            elapsed_ms = elapsed_ms(start),
            "Site loaded"
        );
        Ok(site)
    }

    /// Build a site from already-loaded pages.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::DuplicateSlug`] if two pages share a slug.
    pub fn from_pages(pages: Vec<DocPage>, renderer: Renderer) -> Result<Self, SiteError> {
        let mut by_slug = HashMap::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            if let Some(&first) = by_slug.get(page.slug.as_str()) {
                let first: &DocPage = &pages[first];
                return Err(SiteError::DuplicateSlug {
                    slug: page.slug.clone(),
                    first: first.source_path.clone().unwrap_or_default(),
                    second: page.source_path.clone().unwrap_or_default(),
                });
            }
            by_slug.insert(page.slug.clone(), idx);
        }
        Ok(Self {
            pages,
            by_slug,
            nav: None,
            renderer,
        })
    }

    /// Attach sidebar navigation.
    #[must_use]
    pub fn with_nav(mut self, nav: DocsNav) -> Self {
        self.nav = Some(nav);
        self
    }

    #[must_use]
    pub fn nav(&self) -> Option<&DocsNav> {
        self.nav.as_ref()
    }

    #[must_use]
    pub fn pages(&self) -> &[DocPage] {
        &self.pages
    }

    #[must_use]
    pub fn page(&self, slug: &str) -> Option<&DocPage> {
        self.by_slug.get(slug).map(|&idx| &self.pages[idx])
    }

    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render one page by slug.
    #[must_use]
    pub fn render_page(&self, slug: &str, locale: Locale) -> Option<RenderedPage> {
        self.page(slug)
            .map(|page| PageRenderer::new(&self.renderer, locale).render(page))
    }

    /// Page an internal link path points at.
    ///
    /// This is what a navigation callback looks up after the click router
    /// hands it a path.
    #[must_use]
    pub fn page_for_path(&self, path: &str) -> Option<&DocPage> {
        self.page(self.slug_for_path(path))
    }

    /// Sidebar for the page with `slug`, with that page's entry active.
    #[must_use]
    pub fn render_sidebar(&self, slug: &str, locale: Locale) -> Option<String> {
        let docs_root = self.renderer.config().docs_root.as_str();
        self.nav
            .as_ref()
            .map(|nav| NavRenderer::new(nav, docs_root, locale).render(&page_href(docs_root, slug)))
    }

    /// Slug an internal link path points at, if it names a page location.
    ///
    /// `/docs/sdk/python#install` maps to `sdk/python`; the root itself maps
    /// to `index`.
    fn slug_for_path<'p>(&self, path: &'p str) -> &'p str {
        let root = self.renderer.config().docs_root.trim_end_matches('/');
        let path = path.split(['#', '?']).next().unwrap_or(path);
        let slug = path.strip_prefix(root).unwrap_or(path).trim_matches('/');
        if slug.is_empty() { "index" } else { slug }
    }

    fn broken_links(&self, rendered: &RenderedPage) -> Vec<BrokenLink> {
        rendered
            .internal_links
            .iter()
            .filter(|target| !self.by_slug.contains_key(self.slug_for_path(target)))
            .map(|target| BrokenLink {
                page: rendered.slug.clone(),
                target: target.clone(),
            })
            .collect()
    }

    /// Internal sidebar entries whose target is not a known page.
    fn broken_nav_links(&self) -> Vec<BrokenLink> {
        let Some(nav) = &self.nav else {
            return Vec::new();
        };
        let docs_root = self.renderer.config().docs_root.as_str();
        nav.hrefs()
            .into_iter()
            .filter(|href| classify_link(href, docs_root) == LinkKind::Internal)
            .map(|href| resolve_internal_path(href, docs_root))
            .filter(|target| !self.by_slug.contains_key(self.slug_for_path(target)))
            .map(|target| BrokenLink {
                page: NAV_LINK_SOURCE.to_owned(),
                target,
            })
            .collect()
    }

    /// Render every page in parallel and write `<out_dir>/<slug>.html`.
    ///
    /// Also writes `<out_dir>/404.html` unless a page already uses that
    /// slug, and checks sidebar links along with page links.
    ///
    /// # Errors
    ///
    /// Returns an error if an output directory or file cannot be written.
    pub fn build(&self, out_dir: &Path, locale: Locale) -> Result<BuildReport, SiteError> {
        let start = Instant::now();
        let page_renderer = PageRenderer::new(&self.renderer, locale);

        let outcomes = self
            .pages
            .par_iter()
            .map(|page| -> Result<_, SiteError> {
                let rendered = page_renderer.render(page);
                let path = out_dir.join(format!("{}.html", page.slug));
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
                }
                let sidebar = self.render_sidebar(&page.slug, locale);
                let document = html_document(
                    page.title.get(locale),
                    locale,
                    sidebar.as_deref(),
                    &rendered.html,
                );
                fs::write(&path, document).map_err(|e| SiteError::io(&path, e))?;
                Ok((path, rendered))
            })
            .collect::<Result<Vec<_>, SiteError>>()?;

        let mut report = BuildReport::default();
        for (path, rendered) in outcomes {
            for warning in &rendered.warnings {
                tracing::warn!(slug = %rendered.slug, warning = %warning, "Render warning");
                report.warnings.push(format!("{}: {warning}", rendered.slug));
            }
            for link in self.broken_links(&rendered) {
                tracing::warn!(slug = %link.page, href = %link.target, "Broken internal link");
                report.broken_links.push(link);
            }
            report.written.push(path);
        }
        for link in self.broken_nav_links() {
            tracing::warn!(href = %link.target, "Broken navigation link");
            report.broken_links.push(link);
        }
        if !self.by_slug.contains_key(NOT_FOUND_SLUG) {
            report.not_found = Some(self.write_not_found(out_dir, locale)?);
        }

        tracing::info!(
            pages = report.written.len(),
            warnings = report.warnings.len(),
            broken_links = report.broken_links.len(),
            locale = %locale,
            elapsed_ms = elapsed_ms(start),
            "Site built"
        );
        Ok(report)
    }

    fn write_not_found(&self, out_dir: &Path, locale: Locale) -> Result<PathBuf, SiteError> {
        fs::create_dir_all(out_dir).map_err(|e| SiteError::io(out_dir, e))?;
        let path = out_dir.join(format!("{NOT_FOUND_SLUG}.html"));
        let sidebar = self.render_sidebar(NOT_FOUND_SLUG, locale);
        let document = html_document(
            not_found_title(locale),
            locale,
            sidebar.as_deref(),
            &not_found_article(locale),
        );
        fs::write(&path, document).map_err(|e| SiteError::io(&path, e))?;
        Ok(path)
    }
}
