//! Launchpad configuration.
//!
//! Every section defaults to the News Visualizer project layout, so a
//! `launchpad.toml` is only needed to override something. Fields missing from
//! a file keep their defaults.

use crate::error::{ConfigError, Result};
use launchpad_env::{default_maven_program, ToolRequirement};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File looked up in the project root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "launchpad.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub project: ProjectSettings,

    /// Tools probed before building, in priority order.
    pub tools: Vec<ToolRequirement>,

    pub build: BuildToolSettings,

    pub checks: CheckSettings,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            project: ProjectSettings::default(),
            tools: vec![ToolRequirement::java(), ToolRequirement::maven()],
            build: BuildToolSettings::default(),
            checks: CheckSettings::default(),
        }
    }
}

impl LaunchpadConfig {
    /// Load configuration for `project_root`.
    ///
    /// Uses `explicit` when given, else `<project_root>/launchpad.toml` when it
    /// exists, else the defaults.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = project_root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text without validating it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(ConfigError::Invalid("no tools configured".to_string()));
        }
        if let Some(tool) = self.tools.iter().find(|t| t.program.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "tool '{}' has an empty program",
                tool.id
            )));
        }
        if self.project.main_class.trim().is_empty() {
            return Err(ConfigError::Invalid("project.main_class is empty".to_string()));
        }
        if self.build.program.trim().is_empty() {
            return Err(ConfigError::Invalid("build.program is empty".to_string()));
        }
        for id in &self.checks.toolchain {
            if self.tool(id).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "checks.toolchain references unknown tool '{}'",
                    id
                )));
            }
        }
        if self.checks.compile_timeout_secs == 0 || self.checks.launch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "checks.compile_timeout_secs and checks.launch_timeout_secs must be positive"
                    .to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.checks.pass_threshold) {
            return Err(ConfigError::Invalid(format!(
                "checks.pass_threshold must be within 0.0..=1.0 (got {})",
                self.checks.pass_threshold
            )));
        }
        for check in &self.checks.marker_checks {
            if check.threshold == 0 || check.threshold > check.markers.len() {
                return Err(ConfigError::Invalid(format!(
                    "marker check '{}' needs a threshold between 1 and {} (got {})",
                    check.id,
                    check.markers.len(),
                    check.threshold
                )));
            }
        }
        Ok(())
    }

    /// Tool requirement by catalog id.
    pub fn tool(&self, id: &str) -> Option<&ToolRequirement> {
        self.tools.iter().find(|t| t.id == id)
    }
}

/// The application being prepared and launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub name: String,

    /// Fully-qualified entry point passed to the exec goal.
    pub main_class: String,

    /// Shown after a successful compile, before the application starts.
    pub launch_notes: Vec<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "News Visualizer".to_string(),
            main_class: "com.newsvisualizer.NewsVisualizerApp".to_string(),
            launch_notes: vec![
                "Note: Don't forget to configure your NewsAPI key in:".to_string(),
                "  src/main/java/com/newsvisualizer/service/NewsApiService.java".to_string(),
            ],
        }
    }
}

/// How the build tool is driven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildToolSettings {
    pub program: String,

    /// Non-interactive/quiet flag appended to every goal.
    pub quiet_flag: String,

    pub compile_goals: Vec<String>,

    pub exec_goal: String,

    /// System property naming the entry point (`-D<prop>=<class>`).
    pub main_class_property: String,

    /// System property carrying application arguments.
    pub args_property: String,
}

impl Default for BuildToolSettings {
    fn default() -> Self {
        Self {
            program: default_maven_program().to_string(),
            quiet_flag: "-q".to_string(),
            compile_goals: vec!["clean".to_string(), "compile".to_string()],
            exec_goal: "exec:java".to_string(),
            main_class_property: "exec.mainClass".to_string(),
            args_property: "exec.args".to_string(),
        }
    }
}

/// Validation battery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Paths (relative to the project root) that must exist.
    pub required_paths: Vec<String>,

    /// Tool ids given a dedicated toolchain check.
    pub toolchain: Vec<String>,

    pub compile_timeout_secs: u64,

    pub launch_timeout_secs: u64,

    /// Application argument requesting a self-test start.
    pub self_test_arg: String,

    /// Optional directory holding database files.
    pub data_dir: String,

    pub database_extension: String,

    /// Stderr fragments that mean the entry point could not be loaded.
    pub class_resolution_signatures: Vec<String>,

    pub marker_checks: Vec<CheckSpec>,

    /// Success rate at or above which the project is ready.
    pub pass_threshold: f64,
}

impl CheckSettings {
    pub fn compile_timeout(&self) -> Duration {
        Duration::from_secs(self.compile_timeout_secs)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_secs)
    }
}

const SOURCE_ROOT: &str = "src/main/java/com/newsvisualizer";

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            required_paths: vec![
                "pom.xml".to_string(),
                "launch.py".to_string(),
                format!("{SOURCE_ROOT}/NewsVisualizerApp.java"),
                format!("{SOURCE_ROOT}/gui/MainWindow.java"),
                format!("{SOURCE_ROOT}/gui/NewsAppPanel.java"),
            ],
            toolchain: vec!["java".to_string()],
            compile_timeout_secs: 120,
            launch_timeout_secs: 30,
            self_test_arg: "-test".to_string(),
            data_dir: "data".to_string(),
            database_extension: "db".to_string(),
            class_resolution_signatures: vec![
                "ClassNotFoundException".to_string(),
                "NoClassDefFoundError".to_string(),
            ],
            marker_checks: default_marker_checks(),
            pass_threshold: 0.80,
        }
    }
}

/// A content check: pass when at least `threshold` markers are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSpec {
    pub id: String,
    pub description: String,

    /// Artifact path relative to the project root.
    pub artifact: PathBuf,

    pub markers: Vec<Marker>,

    /// Minimum number of matched markers. Usually below `markers.len()`.
    pub threshold: usize,
}

/// A feature recognised by literal substrings; all of them must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub patterns: Vec<String>,
}

impl Marker {
    pub fn new(label: &str, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether `content` contains every pattern.
    pub fn is_present_in(&self, content: &str) -> bool {
        !self.patterns.is_empty() && self.patterns.iter().all(|p| content.contains(p.as_str()))
    }
}

fn default_marker_checks() -> Vec<CheckSpec> {
    vec![
        CheckSpec {
            id: "ui_improvements".to_string(),
            description: "UI improvements in MainWindow".to_string(),
            artifact: PathBuf::from(format!("{SOURCE_ROOT}/gui/MainWindow.java")),
            markers: vec![
                Marker::new("Increased window size", &["setSize(1800, 1200)"]),
                Marker::new(
                    "Larger minimum window size",
                    &["setMinimumSize(new Dimension(1600, 900))"],
                ),
                Marker::new(
                    "Enhanced summary text width",
                    &["120);", "columns for even wider text"],
                ),
                Marker::new("Increased font size for readability", &["Font.PLAIN, 18)"]),
                Marker::new("Increased table row height", &["setRowHeight(55)"]),
            ],
            threshold: 4,
        },
        CheckSpec {
            id: "panel_enhancements".to_string(),
            description: "NewsAppPanel enhancements".to_string(),
            artifact: PathBuf::from(format!("{SOURCE_ROOT}/gui/NewsAppPanel.java")),
            markers: vec![
                Marker::new("Article summary dialog", &["showArticleSummaryDialog"]),
                Marker::new("Enhanced card renderer", &["Enhanced custom cell renderer"]),
                Marker::new(
                    "Improved interaction hints",
                    &["Double-click to open • Right-click for full summary"],
                ),
                Marker::new(
                    "Larger panel dimensions",
                    &["setPreferredSize(new Dimension(900, 600))"],
                ),
            ],
            threshold: 3,
        },
        CheckSpec {
            id: "launcher_features".to_string(),
            description: "Launcher script features".to_string(),
            artifact: PathBuf::from("launch.py"),
            markers: vec![
                Marker::new("Command availability checking", &["check_command"]),
                Marker::new("Main class execution", &["NewsVisualizerApp"]),
                Marker::new("Cross-platform support", &["Operating System:"]),
                Marker::new("Maven execution", &["mvn exec:java"]),
            ],
            threshold: 3,
        },
    ]
}
