//! Progress observers.
//!
//! The pipeline and the harness report progress through these traits so the
//! binaries can print it; nothing a reporter does feeds back into control flow.

use crate::pipeline::PipelineOutcome;
use crate::runner::PhaseResult;
use crate::validation::CheckOutcome;
use launchpad_env::{ToolCheckResult, ToolRequirement};

/// Position of a pipeline step, e.g. `[2/3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub total: usize,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}

/// Observer for [`crate::BuildOrchestrator`] phase boundaries.
pub trait PipelineReporter: Send + Sync {
    fn tool_check_started(&self, _step: Step, _tool: &ToolRequirement) {}

    fn tool_check_finished(&self, _result: &ToolCheckResult) {}

    fn compile_started(&self, _step: Step, _command_line: &str) {}

    fn compile_finished(&self, _result: &PhaseResult) {}

    /// Called once compilation succeeded, before the application starts.
    fn launch_started(&self, _entry_point: &str, _notes: &[String]) {}

    fn launch_finished(&self, _result: &PhaseResult) {}

    fn pipeline_finished(&self, _outcome: &PipelineOutcome) {}
}

/// Observer for [`crate::ValidationHarness`] checks.
pub trait ValidationReporter: Send + Sync {
    fn check_started(&self, _id: &str, _description: &str) {}

    fn check_finished(&self, _outcome: &CheckOutcome) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl PipelineReporter for NullReporter {}

impl ValidationReporter for NullReporter {}
