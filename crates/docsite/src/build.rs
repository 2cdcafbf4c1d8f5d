//! The build command implementation.

use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config};
use docsite_pipeline::{Pipeline, PipelineOptions};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Package source tree root (default: current directory).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Package name to document (overrides config).
    #[arg(short, long)]
    package: Option<String>,

    /// Static-site builder configuration file (overrides config).
    #[arg(long)]
    mkdocs_config: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            package: self.package.clone(),
            mkdocs_config: self.mkdocs_config.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(config = %path.display(), "loaded configuration");
        }

        let package_root = match &self.root {
            Some(root) => root.canonicalize()?,
            None => std::env::current_dir()?,
        };
        let package = config.package_name(&package_root)?;

        output.info(&format!("Package: {package}"));
        output.info(&format!("Root: {}", package_root.display()));

        let pipeline = Pipeline::new(PipelineOptions {
            package_root,
            package,
            site_dir: config.build.site_dir.clone(),
            api_dir: config.build.api_dir.clone(),
            mkdocs_config: config.build.mkdocs_config.clone(),
            apidoc_program: config.tools.apidoc.clone(),
            site_program: config.tools.site.clone(),
        });
        let report = pipeline.run()?;

        output.success(&format!("Documentation built: {}", report.url()));
        Ok(())
    }
}
