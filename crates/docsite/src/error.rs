//! CLI error types.

use docsite_config::ConfigError;
use docsite_pipeline::PipelineError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    /// Process exit code for this error: 2 for a missing external tool, a
    /// failed generator's own exit code, 1 for everything else.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Pipeline(err) => err.exit_code(),
            Self::Config(_) | Self::Io(_) => 1,
        }
    }
}
