//! Configuration management for Ink.
//!
//! Parses `ink.toml` with serde and discovers it in the current directory or
//! its parents. CLI settings are applied during load via [`CliSettings`].
//!
//! ```toml
//! [docs]
//! content_dir = "content"
//! output_dir = "dist/docs"
//! root_path = "/docs"
//! locale = "en"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Every `[docs]` value supports `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ink.toml";

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_OUTPUT_DIR: &str = "dist/docs";
const DEFAULT_ROOT_PATH: &str = "/docs";
const DEFAULT_LOCALE: &str = "en";

/// Locales with content.
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh"];

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub content_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub root_path: Option<String>,
    pub locale: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation settings as written in TOML.
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw `[docs]` section (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    content_dir: Option<String>,
    output_dir: Option<String>,
    root_path: Option<String>,
    locale: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding the page `.toml` files.
    pub content_dir: PathBuf,
    /// Directory the rendered pages are written to.
    pub output_dir: PathBuf,
    /// Path prefix that marks a link as internal.
    pub root_path: String,
    /// Locale to render.
    pub locale: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.content_dir`").
        field: String,
        /// Error message (e.g., "${`INK_CONTENT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `ink.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution and validated together
    /// with the file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.docs_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(root_path) = &settings.root_path {
            self.docs_resolved.root_path.clone_from(root_path);
        }
        if let Some(locale) = &settings.locale {
            self.docs_resolved.locale.clone_from(locale);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        discover_from(&start)
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                content_dir: base.join(DEFAULT_CONTENT_DIR),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                root_path: DEFAULT_ROOT_PATH.to_owned(),
                locale: DEFAULT_LOCALE.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand before resolving, so `${VAR}` may hold a relative path
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_root_path(&self.docs_resolved.root_path)?;
        if !SUPPORTED_LOCALES.contains(&self.docs_resolved.locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "docs.locale must be one of {}, got '{}'",
                SUPPORTED_LOCALES.join(", "),
                self.docs_resolved.locale
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let docs = &mut self.docs;
        for (value, field) in [
            (&mut docs.content_dir, "docs.content_dir"),
            (&mut docs.output_dir, "docs.output_dir"),
            (&mut docs.root_path, "docs.root_path"),
            (&mut docs.locale, "docs.locale"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            content_dir: resolve(self.docs.content_dir.as_deref(), DEFAULT_CONTENT_DIR),
            output_dir: resolve(self.docs.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
            root_path: self
                .docs
                .root_path
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_PATH.to_owned()),
            locale: self
                .docs
                .locale
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_owned()),
        };
    }
}

fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn validate_root_path(root_path: &str) -> Result<(), ConfigError> {
    if !root_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "docs.root_path must start with '/', got '{root_path}'"
        )));
    }
    if root_path.len() > 1 && root_path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "docs.root_path must not end with '/', got '{root_path}'"
        )));
    }
    if root_path.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "docs.root_path must not contain whitespace, got '{root_path}'"
        )));
    }
    if root_path.contains(['?', '#']) {
        return Err(ConfigError::Validation(format!(
            "docs.root_path must not contain '?' or '#', got '{root_path}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(
            config.docs_resolved,
            DocsConfig {
                content_dir: PathBuf::from("/site/content"),
                output_dir: PathBuf::from("/site/dist/docs"),
                root_path: "/docs".to_owned(),
                locale: "en".to_owned(),
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/site"));
        assert_eq!(config.docs_resolved.root_path, "/docs");
        assert_eq!(config.docs_resolved.content_dir, PathBuf::from("/site/content"));
    }

    #[test]
    fn test_resolve_paths_relative_to_config_dir() {
        let toml = r#"
[docs]
content_dir = "pages"
output_dir = "/var/www/docs"
root_path = "/help"
locale = "zh"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.content_dir, PathBuf::from("/project/pages"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/var/www/docs"));
        assert_eq!(config.docs_resolved.root_path, "/help");
        assert_eq!(config.docs_resolved.locale, "zh");
    }

    #[test]
    fn test_unknown_docs_key_rejected() {
        let result: Result<Config, _> = toml::from_str("[docs]\nsource = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            locale: Some("zh".to_owned()),
            ..Default::default()
        });

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.docs_resolved.locale, "zh");
        assert_eq!(config.docs_resolved.content_dir, PathBuf::from("/site/content")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Config::default_with_base(Path::new("/site"));
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_resolved, before.docs_resolved);
    }

    #[test]
    fn test_validate_root_path() {
        let mut config = Config::default_with_base(Path::new("/site"));

        config.docs_resolved.root_path = "docs".to_owned();
        assert_validation_error(&config, &["root_path", "start with"]);

        config.docs_resolved.root_path = "/docs/".to_owned();
        assert_validation_error(&config, &["root_path", "end with"]);

        config.docs_resolved.root_path = "/my docs".to_owned();
        assert_validation_error(&config, &["root_path", "whitespace"]);

        config.docs_resolved.root_path = "/a?b".to_owned();
        assert_validation_error(&config, &["root_path", "'?' or '#'"]);

        config.docs_resolved.root_path = "/docs#top".to_owned();
        assert_validation_error(&config, &["root_path", "'?' or '#'"]);

        config.docs_resolved.root_path = "/".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_locale() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.docs_resolved.locale = "fr".to_owned();
        assert_validation_error(&config, &["docs.locale", "fr"]);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("INK_TEST_DOCS_ROOT", "/guide");
        }
        let toml = r#"
[docs]
root_path = "${INK_TEST_DOCS_ROOT}"
locale = "${INK_TEST_LOCALE_UNSET:-zh}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.root_path, "/guide");
        assert_eq!(config.docs_resolved.locale, "zh");

        unsafe {
            std::env::remove_var("INK_TEST_DOCS_ROOT");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        std::fs::write(&path, "[docs]\ncontent_dir = \"src/pages\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.content_dir, dir.path().join("src/pages"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/ink.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_cli_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            root_path: Some("relative".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("root_path"));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        std::fs::write(&path, "[docs\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_in_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("ink.toml"), "").unwrap();

        assert_eq!(discover_from(&nested), Some(dir.path().join("ink.toml")));
    }
}
