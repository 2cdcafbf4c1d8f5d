//! Configuration management for docsite.
//!
//! Parses `docsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every section is optional; the defaults reproduce the conventional layout
//! of a Python package documented with pdoc and mkdocs:
//!
//! ```toml
//! [package]
//! name = "mypackage"        # defaults to the package root's directory name
//!
//! [build]
//! site_dir = "site"
//! api_dir = "docs/api"
//! mkdocs_config = "mkdocs.yml"
//!
//! [tools]
//! apidoc = "pdoc"           # program name overrides, e.g. a venv-local tool
//! site = "mkdocs"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the documented package name.
    pub package: Option<String>,
    /// Override the mkdocs configuration file path.
    pub mkdocs_config: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsite.toml";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Documented package configuration.
    pub package: PackageConfig,
    /// Build layout configuration.
    pub build: BuildConfig,
    /// External tool program names.
    pub tools: ToolsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Documented package configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PackageConfig {
    /// Name of the package to document. When absent, the directory name of
    /// the package root is used.
    pub name: Option<String>,
}

/// Build layout configuration. All paths are relative to the package root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for the assembled site.
    pub site_dir: PathBuf,
    /// Destination directory for the relocated API reference HTML.
    pub api_dir: PathBuf,
    /// Static-site builder configuration file.
    pub mkdocs_config: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            api_dir: PathBuf::from("docs/api"),
            mkdocs_config: PathBuf::from("mkdocs.yml"),
        }
    }
}

/// External tool program names, resolvable on the search path.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// API reference generator program.
    pub apidoc: String,
    /// Static-site builder program.
    pub site: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            apidoc: "pdoc".to_owned(),
            site: "mkdocs".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsite.toml` in the current directory and
    /// parents, falling back to the defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist or parsing
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(package) = &settings.package {
            self.package.name = Some(package.clone());
        }
        if let Some(mkdocs_config) = &settings.mkdocs_config {
            self.build.mkdocs_config.clone_from(mkdocs_config);
        }
    }

    /// Resolve the package name, falling back to the directory name of the
    /// package root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when no name is configured and the
    /// root path has no usable final component.
    pub fn package_name(&self, package_root: &Path) -> Result<String, ConfigError> {
        if let Some(name) = &self.package.name {
            return Ok(name.clone());
        }
        package_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "package name not configured and not derivable from the package root".into(),
                )
            })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.package.name {
            require_non_empty(name, "package.name")?;
        }
        require_non_empty(&self.tools.apidoc, "tools.apidoc")?;
        require_non_empty(&self.tools.site, "tools.site")?;
        if self.build.site_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "build.site_dir cannot be empty".into(),
            ));
        }
        if self.build.api_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "build.api_dir cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
