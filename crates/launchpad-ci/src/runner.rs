//! Stage execution.

use crate::stage::StageConfig;
use launchpad_env::{CommandRunner, EnvError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Result of a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    /// Phase name.
    pub phase_name: String,

    /// Whether execution succeeded.
    pub succeeded: bool,

    /// Exit code (0 = success, -1 = signal or no process).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl PhaseResult {
    /// Whether this phase passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.succeeded && self.exit_code == 0
    }

    /// A phase whose process could not be run or waited on.
    ///
    /// The error text takes the place of stderr so it is reported through the
    /// same path as a non-zero exit.
    pub fn invocation_error(phase_name: &str, error: &EnvError, duration_ms: u64) -> Self {
        Self {
            phase_name: phase_name.to_string(),
            succeeded: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: error.to_string(),
            duration_ms,
        }
    }
}

/// Executes stage configurations through a [`CommandRunner`].
pub struct StageRunner;

impl StageRunner {
    /// Execute a single stage and return the result.
    ///
    /// Errors only when no exit status was observed (spawn failure, timeout).
    pub async fn execute_stage(
        runner: &dyn CommandRunner,
        config: &StageConfig,
        working_dir: &Path,
    ) -> Result<PhaseResult, EnvError> {
        let spec = config.to_command_spec(working_dir)?;
        debug!(stage = %config.name, command = %spec, "Executing stage");

        let output = runner.run(&spec).await?;

        Ok(PhaseResult {
            phase_name: config.name.clone(),
            succeeded: output.success,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            duration_ms: output.duration_ms,
        })
    }

    /// Execute a stage, folding invocation errors into a failed result.
    pub async fn execute_stage_lossy(
        runner: &dyn CommandRunner,
        config: &StageConfig,
        working_dir: &Path,
    ) -> PhaseResult {
        let start = Instant::now();
        match Self::execute_stage(runner, config, working_dir).await {
            Ok(result) => result,
            Err(e) => {
                warn!(stage = %config.name, error = %e, "Stage could not be executed");
                PhaseResult::invocation_error(&config.name, &e, start.elapsed().as_millis() as u64)
            }
        }
    }
}
