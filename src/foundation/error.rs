use std::path::PathBuf;

/// Crate-wide result alias.
pub type ScrollResult<T> = Result<T, ScrollError>;

/// Errors reported by the scroll renderer.
///
/// Every variant is fatal to the run that produced it.
#[derive(thiserror::Error, Debug)]
pub enum ScrollError {
    /// Non-positive fps/pace/dimensions or otherwise unusable settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The vector source does not exist.
    #[error("source not found: '{}'", .0.display())]
    SourceNotFound(PathBuf),

    /// An external tool (rasterizer or encoder) failed.
    #[error("{operation} failed ({status}): {}", tool_output(.stdout, .stderr))]
    ExternalToolFailure {
        /// Human readable description of what was attempted.
        operation: String,
        /// Exit status, or the reason the tool could not run.
        status: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// A dimension query returned something that is not a number.
    #[error("dimension query failed: {0}")]
    DimensionQueryFailure(String),

    /// IO and codec failures, with context attached by the caller.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollError {
    /// Build an [`ScrollError::InvalidConfiguration`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build an [`ScrollError::DimensionQueryFailure`].
    pub fn dimension_query(msg: impl Into<String>) -> Self {
        Self::DimensionQueryFailure(msg.into())
    }

    /// Build an [`ScrollError::ExternalToolFailure`] from a finished process.
    pub fn tool_failure(operation: impl Into<String>, output: &std::process::Output) -> Self {
        Self::ExternalToolFailure {
            operation: operation.into(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Build an [`ScrollError::ExternalToolFailure`] for a tool that never produced output.
    pub fn tool_unavailable(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExternalToolFailure {
            operation: operation.into(),
            status: reason.into(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

fn tool_output(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => "no output".to_string(),
        (false, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{stdout}\n{stderr}"),
    }
}
