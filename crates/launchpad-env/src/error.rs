//! Error types for launchpad-env

use thiserror::Error;

/// Errors raised by the process-invocation layer.
///
/// A child that runs and exits non-zero is not an error; it is reported
/// through [`crate::CommandOutput`]. These variants cover the cases where
/// no exit status could be observed at all.
#[derive(Error, Debug)]
pub enum EnvError {
    /// Command line had no program to run
    #[error("Command has no program to execute")]
    EmptyCommand,

    /// Executable could not be started (usually not in PATH)
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Child did not finish within the configured limit
    #[error("'{program}' timed out after {secs} seconds")]
    Timeout { program: String, secs: u64 },

    /// IO error while waiting on the child
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnvError {
    /// Whether this error is a timeout expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, EnvError::Timeout { .. })
    }

    /// Whether the executable was missing from PATH.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EnvError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
