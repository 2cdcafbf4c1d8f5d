//! The build orchestrator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::apidoc;
use crate::error::PipelineError;
use crate::site;
use crate::tools::{APIDOC_INSTALL_HINT, SITE_INSTALL_HINT, Tool, Toolchain};

/// Name of the transient wrapper directory the API generator writes into,
/// created under the site directory and removed after relocation.
const API_TMP_DIR: &str = ".apidoc";

/// Options for constructing a [`Pipeline`].
///
/// Relative paths are resolved against `package_root`.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Root of the package source tree; working directory for both tools.
    pub package_root: PathBuf,
    /// Name of the package to document.
    pub package: String,
    /// Output directory for the assembled site.
    pub site_dir: PathBuf,
    /// Destination directory for the relocated API reference HTML.
    pub api_dir: PathBuf,
    /// Static-site builder configuration file.
    pub mkdocs_config: PathBuf,
    /// Program name of the API reference generator.
    pub apidoc_program: String,
    /// Program name of the static-site builder.
    pub site_program: String,
}

impl PipelineOptions {
    /// Options with the conventional layout: `site/`, `docs/api`,
    /// `mkdocs.yml`, and the stock pdoc/mkdocs program names.
    #[must_use]
    pub fn new(package_root: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            package_root: package_root.into(),
            package: package.into(),
            site_dir: PathBuf::from("site"),
            api_dir: PathBuf::from("docs/api"),
            mkdocs_config: PathBuf::from("mkdocs.yml"),
            apidoc_program: "pdoc".to_owned(),
            site_program: "mkdocs".to_owned(),
        }
    }
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    /// Entry page of the assembled site.
    pub index_html: PathBuf,
}

impl BuildReport {
    /// A `file://` URL for the site's entry page.
    #[must_use]
    pub fn url(&self) -> String {
        format!("file://{}", self.index_html.display())
    }
}

/// Resolved executable paths for the two generators.
struct ResolvedTools {
    apidoc: PathBuf,
    site: PathBuf,
}

/// Sequential documentation build orchestrator.
///
/// A run executes the steps strictly in order; each depends on the
/// filesystem side effects of the previous one. See the crate docs for the
/// step list and failure model.
pub struct Pipeline {
    options: PipelineOptions,
    toolchain: Toolchain,
}

impl Pipeline {
    /// Create a pipeline resolving tools on the process `PATH`.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            toolchain: Toolchain::from_env(),
        }
    }

    /// Replace the toolchain used for tool resolution.
    #[must_use]
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingTool`] before any filesystem mutation
    /// when a generator cannot be resolved, [`PipelineError::ToolFailed`]
    /// when a generator exits non-zero (the half-built site directory is
    /// left in place), or an I/O error from the relocation.
    pub fn run(&self) -> Result<BuildReport, PipelineError> {
        let tools = self.check_tools()?;

        let site_dir = self.resolve(&self.options.site_dir);
        reset_dir(&site_dir)?;

        let api_tmp = site_dir.join(API_TMP_DIR);
        apidoc::generate(
            &tools.apidoc,
            &self.options.apidoc_program,
            &self.options.package_root,
            &api_tmp,
            &self.options.package,
        )?;
        apidoc::relocate(&api_tmp, &self.options.package, &self.resolve(&self.options.api_dir))?;

        site::build(
            &tools.site,
            &self.options.site_program,
            &self.options.package_root,
            &self.options.mkdocs_config,
            &site_dir,
        )?;

        Ok(BuildReport {
            index_html: site_dir.join("index.html"),
        })
    }

    /// Verify both generators resolve on the search path.
    ///
    /// Runs before anything is touched on disk, so a missing tool aborts the
    /// run with zero mutation.
    fn check_tools(&self) -> Result<ResolvedTools, PipelineError> {
        let apidoc = self.check_tool(&Tool {
            program: self.options.apidoc_program.clone(),
            install_hint: APIDOC_INSTALL_HINT,
        })?;
        let site = self.check_tool(&Tool {
            program: self.options.site_program.clone(),
            install_hint: SITE_INSTALL_HINT,
        })?;
        Ok(ResolvedTools { apidoc, site })
    }

    fn check_tool(&self, tool: &Tool) -> Result<PathBuf, PipelineError> {
        self.toolchain
            .find(&tool.program)
            .inspect(|path| tracing::debug!(program = %tool.program, path = %path.display(), "resolved tool"))
            .ok_or_else(|| PipelineError::MissingTool {
                program: tool.program.clone(),
                install_hint: tool.install_hint.to_owned(),
            })
    }

    /// Resolve a possibly-relative configured path against the package root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.options.package_root.join(path)
        }
    }
}

/// Wipe and recreate a directory.
///
/// Removal failures are tolerated (a nonexistent directory is not an error,
/// and any other removal failure surfaces later as stale content rather than
/// aborting the run); creation failures are not.
fn reset_dir(dir: &Path) -> Result<(), PipelineError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => tracing::warn!(dir = %dir.display(), "failed to remove previous output: {err}"),
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Run an external tool to completion, propagating a non-zero exit status.
pub(crate) fn run_tool(program: &str, command: &mut Command) -> Result<(), PipelineError> {
    tracing::debug!(?command, "running {program}");
    let status = command.status()?;
    if !status.success() {
        return Err(PipelineError::ToolFailed {
            program: program.to_owned(),
            status,
        });
    }
    Ok(())
}
