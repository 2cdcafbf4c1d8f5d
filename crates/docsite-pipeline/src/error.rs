//! Pipeline error types.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Error returned by the build pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required external tool is not on the search path. Raised before any
    /// filesystem mutation.
    #[error("`{program}` not found on the search path; install it with `{install_hint}`")]
    MissingTool {
        /// Program name that failed to resolve.
        program: String,
        /// Suggested install command.
        install_hint: String,
    },

    /// An invoked generator exited non-zero. Its exit status is propagated
    /// unchanged to the caller.
    #[error("`{program}` failed ({status})")]
    ToolFailed {
        /// Program name of the failed generator.
        program: String,
        /// The generator's own exit status.
        status: ExitStatus,
    },

    /// The API generator completed but left nothing at its expected output
    /// location.
    #[error("API generator produced no output at {}", .0.display())]
    MissingApiOutput(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Exit status the process should terminate with for this error.
    ///
    /// A missing tool maps to 2; a failed generator propagates its own exit
    /// code (1 when it was killed by a signal); everything else maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingTool { .. } => 2,
            Self::ToolFailed { status, .. } => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_maps_to_exit_2() {
        let err = PipelineError::MissingTool {
            program: "pdoc".to_owned(),
            install_hint: "pip3 install pdoc3".to_owned(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("pip3 install pdoc3"));
    }

    #[cfg(unix)]
    #[test]
    fn tool_failure_propagates_the_tool_exit_code() {
        use std::os::unix::process::ExitStatusExt;

        let err = PipelineError::ToolFailed {
            program: "mkdocs".to_owned(),
            status: ExitStatus::from_raw(3 << 8),
        };
        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn signal_termination_maps_to_exit_1() {
        use std::os::unix::process::ExitStatusExt;

        // SIGKILL: no exit code is available.
        let err = PipelineError::ToolFailed {
            program: "mkdocs".to_owned(),
            status: ExitStatus::from_raw(9),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
