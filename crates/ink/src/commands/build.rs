//! `ink build` command implementation.

use std::path::PathBuf;

use clap::Args;
use ink_config::{CliSettings, Config};
use ink_renderer::{Renderer, RendererConfig};
use ink_site::{Locale, Site};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover ink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding page files (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Output directory for rendered pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Locale to render: en or zh (overrides config).
    #[arg(short, long)]
    locale: Option<String>,

    /// Enable verbose output (show render warnings and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            output_dir: self.output_dir,
            locale: self.locale,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;
        let locale: Locale = docs.locale.parse()?;
        tracing::info!(
            config = ?config.config_path,
            root_path = %docs.root_path,
            locale = %locale,
            "Configuration loaded"
        );

        output.info(&format!("Content: {}", docs.content_dir.display()));
        output.info(&format!("Output: {}", docs.output_dir.display()));

        let renderer = Renderer::new(RendererConfig::new(docs.root_path.as_str()));
        let site = Site::load(&docs.content_dir, renderer)?;
        let report = site.build(&docs.output_dir, locale)?;

        output.build_report(&report, locale, &docs.output_dir, self.verbose);
        Ok(())
    }
}
