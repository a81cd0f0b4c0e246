use std::path::PathBuf;

/// Error returned when loading or building the site fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A page file is not valid TOML or does not match the page schema.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Two page files declare the same slug.
    #[error("Duplicate page slug '{slug}' in {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    /// A slug that cannot be used as an output path.
    #[error("Invalid page slug '{slug}' in {}", path.display())]
    InvalidSlug { slug: String, path: PathBuf },
    /// Locale code other than `en` or `zh`.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
