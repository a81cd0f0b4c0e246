//! Ink CLI - documentation markdown renderer.
//!
//! Provides commands for:
//! - `render`: Render one markdown file (or stdin) to stdout
//! - `build`: Render every documentation page to static HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs};
use output::Output;

/// Ink - documentation markdown renderer.
#[derive(Parser)]
#[command(name = "ink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to stdout.
    Render(RenderArgs),
    /// Build the documentation site.
    Build(BuildArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.verbose,
            Self::Build(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Build(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from(["ink", "render", "guide.md", "--root-path", "/help", "-v"])
            .unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from(["ink", "build", "--locale", "zh", "-o", "out"]).unwrap();
        assert!(!cli.command.verbose());
        assert!(matches!(cli.command, Commands::Build(_)));
    }
}
