//! Launchpad CI - build, launch and validate a Maven project
//!
//! Provides:
//! - A fail-fast orchestrator (toolchain check, compile, launch)
//! - A launcher for the compiled application
//! - A validation harness with a weighted readiness verdict

pub mod gate;
pub mod launcher;
pub mod pipeline;
pub mod reporter;
pub mod runner;
pub mod stage;
pub mod validation;

// Re-export key types
pub use gate::{GateVerdict, ReadinessGate, ReadinessVerdict};
pub use launcher::Launcher;
pub use pipeline::{BuildOrchestrator, PipelineOutcome, PipelineStatus, Remediation};
pub use reporter::{NullReporter, PipelineReporter, Step, ValidationReporter};
pub use runner::{PhaseResult, StageRunner};
pub use stage::{BuiltinStage, StageConfig};
pub use validation::{
    default_battery, Check, CheckContext, CheckOutcome, ValidationHarness, ValidationReport,
};
