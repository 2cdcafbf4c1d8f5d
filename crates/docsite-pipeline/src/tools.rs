//! External tool resolution on the command search path.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suggested install command for the API reference generator.
pub(crate) const APIDOC_INSTALL_HINT: &str = "pip3 install pdoc3";

/// Suggested install command for the static-site builder.
pub(crate) const SITE_INSTALL_HINT: &str = "pip3 install mkdocs";

/// A required external tool: its program name and the install command to
/// suggest when it cannot be found.
#[derive(Debug, Clone)]
pub(crate) struct Tool {
    pub(crate) program: String,
    pub(crate) install_hint: &'static str,
}

/// Resolves program names to executable paths.
///
/// By default the process `PATH` is consulted; a different search path can be
/// injected, which is how tests point the pipeline at stub generators.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    search_path: Option<OsString>,
}

impl Toolchain {
    /// Toolchain backed by the process `PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self { search_path: None }
    }

    /// Toolchain backed by an explicit search path value.
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Resolve a program name to an executable path.
    ///
    /// A name containing a path separator is checked as-is; a bare name is
    /// searched across the path entries in order.
    #[must_use]
    pub fn find(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }

        let search_path = match &self.search_path {
            Some(path) => path.clone(),
            None => env::var_os("PATH")?,
        };
        env::split_paths(&search_path)
            .map(|dir| dir.join(program))
            .find(|path| is_executable(path))
    }
}

/// Check whether a path points at an executable regular file.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
