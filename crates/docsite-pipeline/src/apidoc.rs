//! API reference generation step.
//!
//! Runs the API-doc generator in HTML mode, then relocates the package
//! subdirectory it deposits under the temporary output directory to the fixed
//! `docs/api` destination.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::PipelineError;
use crate::pipeline::run_tool;

/// Generate API reference HTML for `package` into `out_dir`.
///
/// The generator runs with `package_root` as its working directory so that
/// package discovery resolves against the source tree.
pub(crate) fn generate(
    tool: &Path,
    program: &str,
    package_root: &Path,
    out_dir: &Path,
    package: &str,
) -> Result<(), PipelineError> {
    tracing::info!(package, "generating API reference");
    run_tool(
        program,
        Command::new(tool)
            .arg("--html")
            .arg("--output-dir")
            .arg(out_dir)
            .arg(package)
            .current_dir(package_root),
    )
}

/// Move the generated API HTML from the temporary wrapper to its final home.
///
/// The generator deposits its output at `out_dir/<package>`; that inner
/// directory replaces whatever is at `api_dir`, after which the emptied
/// wrapper is removed.
pub(crate) fn relocate(
    out_dir: &Path,
    package: &str,
    api_dir: &Path,
) -> Result<(), PipelineError> {
    let generated = out_dir.join(package);
    if !generated.is_dir() {
        return Err(PipelineError::MissingApiOutput(generated));
    }

    if let Some(parent) = api_dir.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::remove_dir_all(api_dir) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err.into()),
        _ => {}
    }
    fs::rename(&generated, api_dir)?;
    fs::remove_dir_all(out_dir)?;

    tracing::info!(api_dir = %api_dir.display(), "relocated API reference");
    Ok(())
}
