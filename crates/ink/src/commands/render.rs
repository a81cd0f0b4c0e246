//! `ink render` command implementation.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Args;
use ink_config::{CliSettings, Config};
use ink_renderer::{RenderResult, Renderer, RendererConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin).
    file: Option<PathBuf>,

    /// Documentation root path for internal links (overrides config).
    #[arg(long, env = "INK_ROOT_PATH")]
    root_path: Option<String>,

    /// Path to configuration file (default: auto-discover ink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show render warnings and logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root_path: self.root_path,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            config = ?config.config_path,
            root_path = %config.docs_resolved.root_path,
            "Configuration loaded"
        );

        let content = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let renderer = Renderer::new(RendererConfig::new(
            config.docs_resolved.root_path.as_str(),
        ));
        let RenderResult { markup, warnings } = renderer.render_document(&content);
        tracing::info!(
            input_bytes = content.len(),
            output_bytes = markup.as_str().len(),
            warnings = warnings.len(),
            "Document rendered"
        );

        let mut stdout = io::stdout().lock();
        stdout.write_all(markup.as_str().as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;

        if self.verbose {
            output.render_warnings(&warnings);
        }
        Ok(())
    }
}
