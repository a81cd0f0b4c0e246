//! Page discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SiteError;
use crate::content::{DocPage, DocsNav};
use crate::nav::NAV_FILE;

/// Extension of page files.
const PAGE_EXTENSION: &str = "toml";

/// Load every page file under `content_dir`, recursively.
///
/// Hidden files and directories are skipped. Pages are returned sorted by
/// slug. A missing content directory yields no pages.
pub(crate) fn load_pages(content_dir: &Path) -> Result<Vec<DocPage>, SiteError> {
    let mut files = Vec::new();
    if content_dir.exists() {
        collect_page_files(content_dir, &mut files)?;
    } else {
        tracing::warn!(path = %content_dir.display(), "Content directory does not exist");
    }

    let mut pages = files
        .iter()
        .map(|path| load_page(content_dir, path))
        .collect::<Result<Vec<_>, _>>()?;
    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(pages)
}

fn collect_page_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    let entries = fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| SiteError::io(dir, e))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') || name == NAV_FILE {
            continue;
        }
        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            collect_page_files(&path, files)?;
        } else if path.extension().is_some_and(|e| e == PAGE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}

/// Load the sidebar navigation from `<content_dir>/_nav.toml`, if present.
pub(crate) fn load_nav(content_dir: &Path) -> Result<Option<DocsNav>, SiteError> {
    let path = content_dir.join(NAV_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| SiteError::io(&path, e))?;
    let nav: DocsNav = toml::from_str(&content).map_err(|source| SiteError::Parse {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(sections = nav.sections.len(), path = %path.display(), "Loaded navigation");
    Ok(Some(nav))
}

fn load_page(content_dir: &Path, path: &Path) -> Result<DocPage, SiteError> {
    let content = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
    let mut page: DocPage = toml::from_str(&content).map_err(|source| SiteError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if page.slug.is_empty() {
        page.slug = slug_from_path(content_dir, path);
    }
    page.slug = page.slug.trim_matches('/').to_owned();
    if !is_valid_slug(&page.slug) {
        return Err(SiteError::InvalidSlug {
            slug: page.slug,
            path: path.to_path_buf(),
        });
    }
    page.source_path = Some(path.to_path_buf());

    tracing::debug!(slug = %page.slug, path = %path.display(), "Loaded page");
    Ok(page)
}

/// Slug from a file path relative to the content directory.
///
/// `sdk/python.toml` becomes `sdk/python`.
fn slug_from_path(content_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `slug` is safe to use as a relative output path.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment
                    .chars()
                    .any(|c| c.is_whitespace() || c == '\\' || c.is_control())
        })
}
