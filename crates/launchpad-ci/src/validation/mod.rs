//! Validation harness.
//!
//! Runs a fixed, ordered battery of independent checks against a project and
//! aggregates them into a [`ValidationReport`]. A check that errors or panics
//! becomes one failed outcome; the rest of the battery still runs.

pub mod checks;
pub mod report;

pub use checks::{
    default_battery, evaluate_markers, BuildCheck, DataDirectoryCheck, LaunchReadinessCheck,
    MarkerCheck, StructureCheck, ToolchainCheck,
};
pub use report::{success_rate, CheckOutcome, ValidationReport};

use crate::gate::ReadinessGate;
use crate::reporter::{NullReporter, ValidationReporter};
use async_trait::async_trait;
use futures::FutureExt;
use launchpad_core::LaunchpadConfig;
use launchpad_env::CommandRunner;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a check may consult. Read-only for the whole run.
#[derive(Clone)]
pub struct CheckContext {
    pub project_root: PathBuf,
    pub config: LaunchpadConfig,
    pub runner: Arc<dyn CommandRunner>,
}

/// One validation check.
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable identifier used in reports.
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    /// Evaluate against the current file-system state.
    ///
    /// `Err` is reserved for unexpected failures; an expected negative result
    /// is an `Ok` outcome with `passed = false`.
    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome>;
}

/// Ordered battery of checks.
pub struct ValidationHarness {
    ctx: CheckContext,
    checks: Vec<Box<dyn Check>>,
    gate: ReadinessGate,
    reporter: Arc<dyn ValidationReporter>,
}

impl ValidationHarness {
    pub fn new(ctx: CheckContext, checks: Vec<Box<dyn Check>>) -> Self {
        let gate = ReadinessGate::with_pass_threshold(ctx.config.checks.pass_threshold);
        Self {
            ctx,
            checks,
            gate,
            reporter: Arc::new(NullReporter),
        }
    }

    /// Harness running the configured default battery.
    pub fn from_config(
        project_root: impl Into<PathBuf>,
        config: LaunchpadConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let checks = default_battery(&config);
        let ctx = CheckContext {
            project_root: project_root.into(),
            config,
            runner,
        };
        Self::new(ctx, checks)
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ValidationReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    /// Ids of the checks in execution order.
    pub fn check_ids(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    /// Run every check in order and aggregate.
    pub async fn run_all(&self) -> ValidationReport {
        info!(
            root = %self.ctx.project_root.display(),
            checks = self.checks.len(),
            "Starting validation"
        );

        let mut outcomes = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            self.reporter.check_started(check.id(), check.description());

            let outcome = match AssertUnwindSafe(check.run(&self.ctx)).catch_unwind().await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    warn!(check = check.id(), error = %e, "Check errored");
                    CheckOutcome::errored(check.id(), check.description(), &format!("{e:#}"))
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    warn!(check = check.id(), panic = %message, "Check panicked");
                    CheckOutcome::errored(check.id(), check.description(), &message)
                }
            };

            info!(check = %outcome.id, passed = outcome.passed, "Check finished");
            self.reporter.check_finished(&outcome);
            outcomes.push(outcome);
        }

        let report = ValidationReport::new(self.ctx.project_root.clone(), outcomes, &self.gate);
        info!(
            passed = report.passed_count,
            total = report.total_count,
            verdict = ?report.verdict,
            "Validation finished"
        );
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
