//! lqt CLI - Liquid-style tag preprocessor.
//!
//! Provides commands for:
//! - `render`: Expand the tags in a Markdown document, optionally to HTML
//! - `config`: List configuration options with their resolved values
//! - `tags`: List built-in tags

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, RenderArgs, TagsArgs};
use output::Output;

/// lqt - Liquid-style tag preprocessor.
#[derive(Parser)]
#[command(name = "lqt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand the tags in a Markdown document.
    Render(RenderArgs),
    /// List configuration options and their values.
    Config(ConfigArgs),
    /// List built-in tags.
    Tags(TagsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
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
        Commands::Config(args) => args.execute(),
        Commands::Tags(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
