//! Toolchain check → compile → launch orchestration.

use crate::launcher::Launcher;
use crate::reporter::{NullReporter, PipelineReporter, Step};
use crate::runner::{PhaseResult, StageRunner};
use crate::stage::{BuiltinStage, StageConfig};
use launchpad_core::LaunchpadConfig;
use launchpad_env::{
    CommandRunner, PlatformInfo, RemediationCatalog, ToolCheckResult, ToolProbe, ToolRequirement,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// Likely causes listed when compilation fails.
pub const COMPILE_FAILURE_CAUSES: &[&str] = &[
    "Missing dependencies",
    "Internet connection issues",
    "Java version compatibility",
];

/// Likely causes listed when the application exits unsuccessfully.
pub const LAUNCH_FAILURE_CAUSES: &[&str] = &[
    "An exception was thrown during application startup",
    "No graphical display is available (headless session)",
    "The main class is missing from the compiled output",
];

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Success,
    HaltedMissingTool,
    CompileFailed,
    LaunchFailed,
}

impl PipelineStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineStatus::Success)
    }
}

/// Actionable guidance attached to a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    /// One-line statement of what went wrong.
    pub headline: String,

    /// Raw diagnostic output from the failing process, verbatim.
    pub diagnostics: Option<String>,

    /// Heading for `steps`.
    pub steps_heading: String,

    /// Install steps or likely causes.
    pub steps: Vec<String>,

    /// Other ways to reach the goal.
    pub alternatives: Vec<String>,

    /// Command to run by hand for more detail.
    pub suggested_command: Option<String>,
}

/// Result of a complete pipeline execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub run_id: String,

    pub status: PipelineStatus,

    /// Probe results in probe order; stops at the first missing tool.
    pub tool_checks: Vec<ToolCheckResult>,

    /// Executed phases in order; never contains a phase after a failure.
    pub phases: Vec<PhaseResult>,

    pub remediation: Option<Remediation>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl PipelineOutcome {
    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }

    /// The first tool reported unavailable.
    pub fn missing_tool(&self) -> Option<&ToolCheckResult> {
        self.tool_checks.iter().find(|r| !r.available)
    }

    pub fn phase(&self, name: &str) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.phase_name == name)
    }
}

/// Runs the preflight pipeline for one project.
pub struct BuildOrchestrator {
    runner: Arc<dyn CommandRunner>,
    config: LaunchpadConfig,
    project_root: PathBuf,
    platform: PlatformInfo,
    reporter: Arc<dyn PipelineReporter>,
}

impl BuildOrchestrator {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        config: LaunchpadConfig,
        project_root: impl Into<PathBuf>,
        platform: PlatformInfo,
    ) -> Self {
        Self {
            runner,
            config,
            project_root: project_root.into(),
            platform,
            reporter: Arc::new(NullReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn PipelineReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Execute the pipeline.
    ///
    /// Strictly sequential with no retries. Never fails: every problem,
    /// including invocation errors, ends in a terminal [`PipelineStatus`].
    pub async fn run(&self) -> PipelineOutcome {
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let total_steps = self.config.tools.len() + 1;

        info!(run_id = %run_id, root = %self.project_root.display(), "Starting pipeline");

        let probe = ToolProbe::new(self.runner.clone());
        let mut tool_checks = Vec::new();

        for (i, tool) in self.config.tools.iter().enumerate() {
            self.reporter.tool_check_started(
                Step {
                    index: i + 1,
                    total: total_steps,
                },
                tool,
            );
            let result = probe.check(tool).await;
            self.reporter.tool_check_finished(&result);
            let available = result.available;
            tool_checks.push(result);

            if !available {
                warn!(run_id = %run_id, tool = %tool.id, "Required tool missing, halting");
                let remediation = self.missing_tool_remediation(tool);
                return self.finish(
                    run_id,
                    PipelineStatus::HaltedMissingTool,
                    tool_checks,
                    Vec::new(),
                    Some(remediation),
                    start,
                );
            }
        }

        let compile_stage = self.compile_stage(None);
        self.reporter.compile_started(
            Step {
                index: total_steps,
                total: total_steps,
            },
            &compile_stage.command_line(),
        );
        let compile = StageRunner::execute_stage_lossy(
            self.runner.as_ref(),
            &compile_stage,
            &self.project_root,
        )
        .await;
        self.reporter.compile_finished(&compile);

        if !compile.passed() {
            warn!(run_id = %run_id, exit_code = compile.exit_code, "Compilation failed");
            let remediation = self.compile_remediation(&compile);
            return self.finish(
                run_id,
                PipelineStatus::CompileFailed,
                tool_checks,
                vec![compile],
                Some(remediation),
                start,
            );
        }

        let main_class = &self.config.project.main_class;
        self.reporter
            .launch_started(main_class, &self.config.project.launch_notes);
        let launch = self.launcher().launch(main_class).await;
        self.reporter.launch_finished(&launch);

        let (status, remediation) = if launch.passed() {
            (PipelineStatus::Success, None)
        } else {
            (
                PipelineStatus::LaunchFailed,
                Some(self.launch_remediation(&launch)),
            )
        };

        self.finish(
            run_id,
            status,
            tool_checks,
            vec![compile, launch],
            remediation,
            start,
        )
    }

    /// Run only the COMPILE phase, optionally bounded.
    pub async fn compile(&self, timeout: Option<Duration>) -> PhaseResult {
        StageRunner::execute_stage_lossy(
            self.runner.as_ref(),
            &self.compile_stage(timeout),
            &self.project_root,
        )
        .await
    }

    fn compile_stage(&self, timeout: Option<Duration>) -> StageConfig {
        StageConfig::compile(&self.config.build, 0).with_timeout(timeout)
    }

    fn launcher(&self) -> Launcher {
        Launcher::new(
            self.runner.clone(),
            self.config.build.clone(),
            self.project_root.clone(),
        )
    }

    fn finish(
        &self,
        run_id: String,
        status: PipelineStatus,
        tool_checks: Vec<ToolCheckResult>,
        phases: Vec<PhaseResult>,
        remediation: Option<Remediation>,
        start: Instant,
    ) -> PipelineOutcome {
        let outcome = PipelineOutcome {
            run_id,
            status,
            tool_checks,
            phases,
            remediation,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            run_id = %outcome.run_id,
            status = ?outcome.status,
            duration_ms = outcome.duration_ms,
            "Pipeline finished"
        );
        self.reporter.pipeline_finished(&outcome);
        outcome
    }

    fn missing_tool_remediation(&self, tool: &ToolRequirement) -> Remediation {
        let steps = RemediationCatalog::instructions(&tool.id, self.platform.family)
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut alternatives: Vec<String> = RemediationCatalog::alternatives(&tool.id)
            .iter()
            .map(|s| s.to_string())
            .collect();
        if !alternatives.is_empty() {
            alternatives.push(format!(
                "Run main class: {}",
                self.config.project.main_class
            ));
        }

        Remediation {
            headline: format!("{} is not installed or not in PATH", tool.label),
            diagnostics: None,
            steps_heading: format!("Please install {}:", tool.requirement_label()),
            steps,
            alternatives,
            suggested_command: None,
        }
    }

    fn compile_remediation(&self, compile: &PhaseResult) -> Remediation {
        let mut manual = vec![self.config.build.program.clone()];
        manual.extend(self.config.build.compile_goals.iter().cloned());

        Remediation {
            headline: "Compilation failed!".to_string(),
            diagnostics: Some(compile.stderr.clone()),
            steps_heading: "This might be due to:".to_string(),
            steps: COMPILE_FAILURE_CAUSES.iter().map(|s| s.to_string()).collect(),
            alternatives: Vec::new(),
            suggested_command: Some(manual.join(" ")),
        }
    }

    fn launch_remediation(&self, launch: &PhaseResult) -> Remediation {
        let mut manual: Vec<String> = BuiltinStage::Launch.command(
            &self.config.build,
            &self.config.project.main_class,
            None,
        );
        if manual.last() == Some(&self.config.build.quiet_flag) {
            manual.pop();
        }

        Remediation {
            headline: format!("Application exited with code {}", launch.exit_code),
            diagnostics: Some(launch.stderr.clone()),
            steps_heading: "This might be due to:".to_string(),
            steps: LAUNCH_FAILURE_CAUSES.iter().map(|s| s.to_string()).collect(),
            alternatives: Vec::new(),
            suggested_command: Some(manual.join(" ")),
        }
    }
}
