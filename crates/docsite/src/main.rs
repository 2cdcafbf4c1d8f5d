//! docsite CLI - combined documentation site builder.
//!
//! Builds a documentation website for a Python package by running pdoc for
//! the API reference and mkdocs for the surrounding site. Invoked with no
//! arguments it uses the current directory and the conventional layout;
//! flags and `docsite.toml` override the defaults.

mod build;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use build::BuildArgs;
use output::Output;

/// docsite - combined documentation site builder.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.build.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.build.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(err.exit_code());
    }
}
