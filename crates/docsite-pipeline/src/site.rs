//! Static-site build step.

use std::path::Path;
use std::process::Command;

use crate::error::PipelineError;
use crate::pipeline::run_tool;

/// Assemble the documentation site into `site_dir`.
///
/// The builder runs with `package_root` as its working directory and is
/// expected to pick up the relocated `docs/api` content as part of its site
/// assembly, so this step must only run after the relocation.
pub(crate) fn build(
    tool: &Path,
    program: &str,
    package_root: &Path,
    config_file: &Path,
    site_dir: &Path,
) -> Result<(), PipelineError> {
    tracing::info!(config = %config_file.display(), "assembling documentation site");
    run_tool(
        program,
        Command::new(tool)
            .arg("build")
            .arg("--config-file")
            .arg(config_file)
            .arg("--site-dir")
            .arg(site_dir)
            .current_dir(package_root),
    )
}
