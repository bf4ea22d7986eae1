//! Builtin validation checks.

use super::{Check, CheckContext, CheckOutcome};
use crate::pipeline::BuildOrchestrator;
use crate::runner::StageRunner;
use crate::stage::StageConfig;
use anyhow::Context;
use async_trait::async_trait;
use launchpad_core::{CheckSpec, LaunchpadConfig};
use launchpad_env::{PlatformInfo, ToolProbe, ToolRequirement};
use std::io::ErrorKind;

/// The configured battery, in its fixed order: structure, toolchain,
/// compilation, database files, marker checks, launch readiness.
pub fn default_battery(config: &LaunchpadConfig) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = vec![Box::new(StructureCheck::new(
        config.checks.required_paths.clone(),
    ))];

    for id in &config.checks.toolchain {
        if let Some(tool) = config.tool(id) {
            checks.push(Box::new(ToolchainCheck::new(tool.clone())));
        }
    }

    checks.push(Box::new(BuildCheck::new()));
    checks.push(Box::new(DataDirectoryCheck::new()));

    for spec in &config.checks.marker_checks {
        checks.push(Box::new(MarkerCheck::new(spec.clone())));
    }

    checks.push(Box::new(LaunchReadinessCheck::new()));
    checks
}

/// Required project files must exist.
pub struct StructureCheck {
    required_paths: Vec<String>,
}

impl StructureCheck {
    pub fn new(required_paths: Vec<String>) -> Self {
        Self { required_paths }
    }
}

#[async_trait]
impl Check for StructureCheck {
    fn id(&self) -> &str {
        "project_structure"
    }

    fn description(&self) -> &str {
        "Project structure"
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let missing: Vec<&str> = self
            .required_paths
            .iter()
            .filter(|p| !ctx.project_root.join(p.as_str()).exists())
            .map(String::as_str)
            .collect();

        Ok(if missing.is_empty() {
            CheckOutcome::pass(
                self.id(),
                self.description(),
                "All required project files present",
            )
        } else {
            CheckOutcome::fail(
                self.id(),
                self.description(),
                format!("Missing required files: {}", missing.join(", ")),
            )
        })
    }
}

/// A required tool must be invocable.
pub struct ToolchainCheck {
    id: String,
    description: String,
    tool: ToolRequirement,
}

impl ToolchainCheck {
    pub fn new(tool: ToolRequirement) -> Self {
        Self {
            id: format!("toolchain_{}", tool.id),
            description: format!("{} requirements", tool.label),
            tool,
        }
    }
}

#[async_trait]
impl Check for ToolchainCheck {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let result = ToolProbe::new(ctx.runner.clone()).check(&self.tool).await;

        Ok(if result.available {
            CheckOutcome::pass(
                self.id(),
                self.description(),
                format!(
                    "{} available: {}",
                    self.tool.label,
                    result.version_string.as_deref().unwrap_or("version unknown")
                ),
            )
        } else {
            CheckOutcome::fail(
                self.id(),
                self.description(),
                format!(
                    "{} not available: {}",
                    self.tool.label,
                    result.failure_reason.as_deref().unwrap_or("unknown reason")
                ),
            )
        })
    }
}

/// The COMPILE phase alone, bounded by the compile timeout.
#[derive(Default)]
pub struct BuildCheck;

impl BuildCheck {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Check for BuildCheck {
    fn id(&self) -> &str {
        "compilation"
    }

    fn description(&self) -> &str {
        "Project compilation"
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let orchestrator = BuildOrchestrator::new(
            ctx.runner.clone(),
            ctx.config.clone(),
            ctx.project_root.clone(),
            PlatformInfo::current(),
        );
        let result = orchestrator
            .compile(Some(ctx.config.checks.compile_timeout()))
            .await;

        Ok(if result.passed() {
            CheckOutcome::pass(self.id(), self.description(), "Compilation successful")
        } else {
            CheckOutcome::fail(
                self.id(),
                self.description(),
                format!("Compilation failed: {}", result.stderr.trim()),
            )
        })
    }
}

/// Optional database directory. Never fails; absence is only a warning.
#[derive(Default)]
pub struct DataDirectoryCheck;

impl DataDirectoryCheck {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Check for DataDirectoryCheck {
    fn id(&self) -> &str {
        "database_files"
    }

    fn description(&self) -> &str {
        "Database files"
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let settings = &ctx.config.checks;
        let data_dir = ctx.project_root.join(&settings.data_dir);

        let entries = match std::fs::read_dir(&data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(CheckOutcome::pass(
                    self.id(),
                    self.description(),
                    "No data directory",
                )
                .with_warning("Data directory will be created on first run"));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", data_dir.display()));
            }
        };

        let mut databases = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path
                .extension()
                .map(|ext| ext == settings.database_extension.as_str())
                .unwrap_or(false);
            if matches && path.is_file() {
                if let Some(name) = path.file_name() {
                    databases.push(name.to_string_lossy().to_string());
                }
            }
        }
        databases.sort();

        Ok(if databases.is_empty() {
            CheckOutcome::pass(self.id(), self.description(), "Data directory exists")
                .with_warning("No database files found, but directory exists")
        } else {
            CheckOutcome::pass(
                self.id(),
                self.description(),
                format!("Database files found: {}", databases.join(", ")),
            )
        })
    }
}

/// Labels of the markers present in `content`, and whether they reach the
/// threshold.
pub fn evaluate_markers(spec: &CheckSpec, content: &str) -> (Vec<String>, bool) {
    let mut matched: Vec<String> = Vec::new();
    for marker in &spec.markers {
        if marker.is_present_in(content) && !matched.contains(&marker.label) {
            matched.push(marker.label.clone());
        }
    }
    let passed = matched.len() >= spec.threshold;
    (matched, passed)
}

/// Feature markers in a source artifact.
pub struct MarkerCheck {
    spec: CheckSpec,
}

impl MarkerCheck {
    pub fn new(spec: CheckSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl Check for MarkerCheck {
    fn id(&self) -> &str {
        &self.spec.id
    }

    fn description(&self) -> &str {
        &self.spec.description
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let path = ctx.project_root.join(&self.spec.artifact);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(CheckOutcome::fail(
                    self.id(),
                    self.description(),
                    format!("{} not found", self.spec.artifact.display()),
                ));
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        let (matched, passed) = evaluate_markers(&self.spec, &content);
        let detail = format!(
            "{} of {} markers found (need {}): [{}]",
            matched.len(),
            self.spec.markers.len(),
            self.spec.threshold,
            matched.join(", ")
        );

        let outcome = if passed {
            CheckOutcome::pass(self.id(), self.description(), detail)
        } else {
            CheckOutcome::fail(self.id(), self.description(), detail)
        };
        Ok(outcome.with_markers(matched))
    }
}

/// Start the application in self-test mode under a timeout.
///
/// A timeout passes: the GUI is presumed to be waiting on its window. Only a
/// class-resolution signature in stderr, or a failure to start the build
/// tool at all, fails the check.
#[derive(Default)]
pub struct LaunchReadinessCheck;

impl LaunchReadinessCheck {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Check for LaunchReadinessCheck {
    fn id(&self) -> &str {
        "application_startup"
    }

    fn description(&self) -> &str {
        "Application startup readiness"
    }

    async fn run(&self, ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        let settings = &ctx.config.checks;
        let stage = StageConfig::self_test(
            &ctx.config.build,
            &ctx.config.project.main_class,
            &settings.self_test_arg,
            0,
        )
        .with_timeout(Some(settings.launch_timeout()));

        let result =
            StageRunner::execute_stage(ctx.runner.as_ref(), &stage, &ctx.project_root).await;

        Ok(match result {
            Err(e) if e.is_timeout() => CheckOutcome::pass(
                self.id(),
                self.description(),
                "Application startup test completed (timeout expected for GUI)",
            ),
            Err(e) => CheckOutcome::fail(
                self.id(),
                self.description(),
                format!("Application startup test error: {}", e),
            ),
            Ok(phase) => {
                let unresolved = settings
                    .class_resolution_signatures
                    .iter()
                    .any(|sig| phase.stderr.contains(sig.as_str()));
                if unresolved {
                    CheckOutcome::fail(
                        self.id(),
                        self.description(),
                        format!("Application startup issues: {}", phase.stderr.trim()),
                    )
                } else {
                    CheckOutcome::pass(
                        self.id(),
                        self.description(),
                        "Application main class accessible and dependencies resolved",
                    )
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::Marker;
    use std::path::PathBuf;

    fn spec(threshold: usize) -> CheckSpec {
        CheckSpec {
            id: "letters".to_string(),
            description: "Letter markers".to_string(),
            artifact: PathBuf::from("Letters.java"),
            markers: ["A", "B", "C", "D", "E"]
                .iter()
                .map(|l| Marker::new(l, &[&format!("<{l}>")]))
                .collect(),
            threshold,
        }
    }

    #[test]
    fn test_four_of_five_meets_threshold_four() {
        let (matched, passed) = evaluate_markers(&spec(4), "<A> <B> <C> <D>");
        assert_eq!(matched, vec!["A", "B", "C", "D"]);
        assert!(passed);
    }

    #[test]
    fn test_three_of_five_misses_threshold_four() {
        let (matched, passed) = evaluate_markers(&spec(4), "<A> <B> <C>");
        assert_eq!(matched.len(), 3);
        assert!(!passed);
    }

    #[test]
    fn test_duplicate_labels_counted_once() {
        let mut spec = spec(2);
        spec.markers.push(Marker::new("A", &["<A>"]));
        let (matched, passed) = evaluate_markers(&spec, "<A>");
        assert_eq!(matched, vec!["A"]);
        assert!(!passed);
    }

    #[test]
    fn test_default_battery_order() {
        let config = LaunchpadConfig::default();
        let ids: Vec<String> = default_battery(&config)
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "project_structure",
                "toolchain_java",
                "compilation",
                "database_files",
                "ui_improvements",
                "panel_enhancements",
                "launcher_features",
                "application_startup",
            ]
        );
    }
}
