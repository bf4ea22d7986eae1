//! Toolchain probing.
//!
//! A probe never fails: a tool that cannot be started, exits non-zero, or
//! errors in any other way is simply reported as unavailable.

use crate::exec::{CommandOutput, CommandRunner, CommandSpec};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Stream a tool prints its version banner on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStream {
    #[default]
    Stdout,
    Stderr,
}

/// An external tool the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequirement {
    /// Remediation catalog key (`java`, `maven`).
    pub id: String,

    /// Executable name looked up on PATH.
    pub program: String,

    /// Arguments that make the tool print its version and exit 0.
    pub version_args: Vec<String>,

    /// Human-readable name for progress output.
    pub label: String,

    #[serde(default)]
    pub version_stream: VersionStream,

    /// Oldest supported release, shown in install guidance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
}

impl ToolRequirement {
    /// Java runtime, probed with `java -version` (banner on stderr).
    pub fn java() -> Self {
        Self {
            id: "java".to_string(),
            program: "java".to_string(),
            version_args: vec!["-version".to_string()],
            label: "Java".to_string(),
            version_stream: VersionStream::Stderr,
            min_version: Some("11".to_string()),
        }
    }

    /// Maven, probed with `mvn --version` (banner on stdout).
    pub fn maven() -> Self {
        Self {
            id: "maven".to_string(),
            program: default_maven_program().to_string(),
            version_args: vec!["--version".to_string()],
            label: "Maven".to_string(),
            version_stream: VersionStream::Stdout,
            min_version: None,
        }
    }

    /// Label with the minimum release, e.g. `Java 11 or higher`.
    pub fn requirement_label(&self) -> String {
        match &self.min_version {
            Some(min) => format!("{} {} or higher", self.label, min),
            None => self.label.clone(),
        }
    }

    fn probe_command(&self) -> CommandSpec {
        CommandSpec::new(self.program.clone()).args(self.version_args.iter().cloned())
    }
}

/// Maven ships as a batch script on Windows.
pub fn default_maven_program() -> &'static str {
    if cfg!(windows) {
        "mvn.cmd"
    } else {
        "mvn"
    }
}

/// Outcome of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCheckResult {
    pub tool: ToolRequirement,

    pub available: bool,

    /// First line of the version banner, when one could be read.
    pub version_string: Option<String>,

    /// Why the tool is considered unavailable.
    pub failure_reason: Option<String>,
}

impl ToolCheckResult {
    fn unavailable(tool: &ToolRequirement, reason: String) -> Self {
        Self {
            tool: tool.clone(),
            available: false,
            version_string: None,
            failure_reason: Some(reason),
        }
    }

    /// Dotted version number parsed from the banner.
    pub fn version_number(&self) -> Option<String> {
        self.version_string.as_deref().and_then(parse_version_number)
    }
}

/// Checks whether required tools are invocable.
#[derive(Clone)]
pub struct ToolProbe {
    runner: Arc<dyn CommandRunner>,
}

impl ToolProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Probe `tool`, then read its version banner if it is available.
    pub async fn check(&self, tool: &ToolRequirement) -> ToolCheckResult {
        let availability = self.runner.run(&tool.probe_command().quiet()).await;

        match availability {
            Ok(output) if output.success => {}
            Ok(output) => {
                warn!(tool = %tool.id, exit_code = output.exit_code, "Version probe exited non-zero");
                return ToolCheckResult::unavailable(
                    tool,
                    format!("{} exited with code {}", tool.program, output.exit_code),
                );
            }
            Err(e) if e.is_not_found() => {
                debug!(tool = %tool.id, "Tool not found in PATH");
                return ToolCheckResult::unavailable(
                    tool,
                    format!("{} not found in PATH", tool.program),
                );
            }
            Err(e) => {
                warn!(tool = %tool.id, error = %e, "Version probe failed");
                return ToolCheckResult::unavailable(tool, e.to_string());
            }
        }

        let version_string = match self.runner.run(&tool.probe_command()).await {
            Ok(output) => version_line(&output, tool.version_stream),
            Err(e) => {
                debug!(tool = %tool.id, error = %e, "Could not capture version banner");
                None
            }
        };

        info!(
            tool = %tool.id,
            version = version_string.as_deref().unwrap_or("unknown"),
            "Tool available"
        );

        ToolCheckResult {
            tool: tool.clone(),
            available: true,
            version_string,
            failure_reason: None,
        }
    }
}

/// Pick the banner line from the configured stream, falling back to the other.
fn version_line(output: &CommandOutput, stream: VersionStream) -> Option<String> {
    let (primary, secondary) = match stream {
        VersionStream::Stdout => (output.first_stdout_line(), output.first_stderr_line()),
        VersionStream::Stderr => (output.first_stderr_line(), output.first_stdout_line()),
    };
    primary.or(secondary).map(str::to_string)
}

/// Extract a dotted version number such as `11.0.21` or `3.9.6`.
pub fn parse_version_number(line: &str) -> Option<String> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    let re = VERSION.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)+(?:[._+-][0-9A-Za-z]+)*)").expect("static pattern is valid")
    });
    re.captures(line).map(|c| c[1].to_string())
}
