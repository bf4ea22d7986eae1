//! Readiness gate evaluation for pass/fail criteria.

use crate::validation::ValidationReport;
use serde::{Deserialize, Serialize};

/// Tiered reading of a validation success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessVerdict {
    /// At or above the pass threshold.
    Ready,
    /// Below the pass threshold but at or above the attention threshold.
    NeedsAttention,
    NotReady,
}

impl ReadinessVerdict {
    /// Only `Ready` counts as passing.
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessVerdict::Ready)
    }
}

/// Gate evaluation verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateVerdict {
    /// Whether the gate passed.
    pub passed: bool,

    pub readiness: ReadinessVerdict,

    /// Failed checks with their detail (empty if all passed).
    pub violations: Vec<String>,

    /// Summary message.
    pub message: String,
}

/// Readiness thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessGate {
    pub pass_threshold: f64,
    pub attention_threshold: f64,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self {
            pass_threshold: 0.80,
            attention_threshold: 0.60,
        }
    }
}

impl ReadinessGate {
    pub fn with_pass_threshold(pass_threshold: f64) -> Self {
        let defaults = Self::default();
        Self {
            pass_threshold,
            attention_threshold: defaults.attention_threshold.min(pass_threshold),
        }
    }

    /// Classify a success rate in `0.0..=1.0`.
    pub fn classify(&self, success_rate: f64) -> ReadinessVerdict {
        if success_rate >= self.pass_threshold {
            ReadinessVerdict::Ready
        } else if success_rate >= self.attention_threshold {
            ReadinessVerdict::NeedsAttention
        } else {
            ReadinessVerdict::NotReady
        }
    }

    /// Evaluate a finished report.
    pub fn evaluate(&self, report: &ValidationReport) -> GateVerdict {
        let readiness = self.classify(report.success_rate);
        let violations: Vec<String> = report
            .failed()
            .map(|o| format!("{}: {}", o.id, o.detail))
            .collect();

        let message = match readiness {
            ReadinessVerdict::Ready => "Project is ready to use".to_string(),
            ReadinessVerdict::NeedsAttention => {
                format!("Project has some issues ({} failed check(s))", violations.len())
            }
            ReadinessVerdict::NotReady => {
                format!("Project has significant issues ({} failed check(s))", violations.len())
            }
        };

        GateVerdict {
            passed: readiness.is_ready(),
            readiness,
            violations,
            message,
        }
    }
}
