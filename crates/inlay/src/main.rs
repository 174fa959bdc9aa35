//! inlay CLI - media-link embedding for Markdown notes.
//!
//! Provides commands for:
//! - `render`: Render a Markdown file to HTML with media links embedded
//! - `classify`: Show how a piece of text would be embedded

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClassifyArgs, RenderArgs};
use output::Output;

/// inlay - turn media links into embedded players.
#[derive(Parser)]
#[command(name = "inlay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML, embedding media links.
    Render(RenderArgs),
    /// Classify a link or two-line block and print its widget.
    Classify(ClassifyArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.verbose,
            Self::Classify(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match tokio::runtime::Runtime::new() {
        Ok(rt) => match cli.command {
            Commands::Render(args) => rt.block_on(args.execute()),
            Commands::Classify(args) => rt.block_on(args.execute()),
        },
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
