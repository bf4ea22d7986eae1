//! Application launch.

use crate::runner::{PhaseResult, StageRunner};
use crate::stage::StageConfig;
use launchpad_core::BuildToolSettings;
use launchpad_env::CommandRunner;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Starts the compiled application through the build tool's exec goal.
pub struct Launcher {
    runner: Arc<dyn CommandRunner>,
    build: BuildToolSettings,
    project_root: PathBuf,
    timeout: Option<Duration>,
}

impl Launcher {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        build: BuildToolSettings,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            build,
            project_root: project_root.into(),
            timeout: None,
        }
    }

    /// Bound the launch. Unbounded by default: a GUI runs until closed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stage configuration used for `entry_point`.
    pub fn stage(&self, entry_point: &str) -> StageConfig {
        StageConfig::launch(&self.build, entry_point).with_timeout(self.timeout)
    }

    /// Run `entry_point` and wait for it to exit.
    pub async fn launch(&self, entry_point: &str) -> PhaseResult {
        let stage = self.stage(entry_point);
        info!(entry_point, command = %stage.command_line(), "Launching application");

        let result =
            StageRunner::execute_stage_lossy(self.runner.as_ref(), &stage, &self.project_root)
                .await;

        info!(
            entry_point,
            exit_code = result.exit_code,
            duration_ms = result.duration_ms,
            "Application exited"
        );
        result
    }
}
