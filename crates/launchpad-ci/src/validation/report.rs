//! Check outcomes and the aggregated report.

use crate::gate::{ReadinessGate, ReadinessVerdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of one validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub id: String,
    pub description: String,
    pub passed: bool,

    /// Labels of markers found, in marker order without duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_markers: Vec<String>,

    /// Non-fatal observations (the check still passed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Human-readable explanation of the result.
    pub detail: String,
}

impl CheckOutcome {
    pub fn pass(id: &str, description: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            passed: true,
            matched_markers: Vec::new(),
            warnings: Vec::new(),
            detail: detail.into(),
        }
    }

    pub fn fail(id: &str, description: &str, detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            ..Self::pass(id, description, detail)
        }
    }

    /// A check that errored instead of producing an outcome.
    pub fn errored(id: &str, description: &str, error: &str) -> Self {
        Self::fail(id, description, format!("Check {} failed with error: {}", id, error))
    }

    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        self.matched_markers = markers;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Aggregated validation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub project_root: PathBuf,
    pub outcomes: Vec<CheckOutcome>,
    pub passed_count: usize,
    pub total_count: usize,

    /// `passed_count / total_count`, 0 for an empty battery.
    pub success_rate: f64,

    pub verdict: ReadinessVerdict,
}

impl ValidationReport {
    pub fn new(project_root: PathBuf, outcomes: Vec<CheckOutcome>, gate: &ReadinessGate) -> Self {
        let total_count = outcomes.len();
        let passed_count = outcomes.iter().filter(|o| o.passed).count();
        let success_rate = success_rate(passed_count, total_count);
        Self {
            generated_at: Utc::now(),
            project_root,
            outcomes,
            passed_count,
            total_count,
            success_rate,
            verdict: gate.classify(success_rate),
        }
    }

    /// Success rate as a percentage.
    pub fn success_percent(&self) -> f64 {
        self.success_rate * 100.0
    }

    /// Whether the project is ready to use.
    pub fn is_ready(&self) -> bool {
        self.verdict.is_ready()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn outcome(&self, id: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }
}

/// `passed / total`, defined as 0 when nothing ran.
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64
    }
}
