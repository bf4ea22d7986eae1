//! Build-tool stage definitions and configuration.

use launchpad_core::BuildToolSettings;
use launchpad_env::{CommandSpec, EnvError, OutputMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Builtin build-tool stages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStage {
    /// mvn clean compile -q
    Compile,

    /// mvn exec:java -Dexec.mainClass=<main> -q
    Launch,

    /// mvn exec:java -Dexec.mainClass=<main> -Dexec.args=<arg> -q
    SelfTest,
}

impl BuiltinStage {
    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinStage::Compile => "compile",
            BuiltinStage::Launch => "launch",
            BuiltinStage::SelfTest => "self_test",
        }
    }

    /// Full argv (program first) for this stage.
    ///
    /// `app_arg` is only used by [`BuiltinStage::SelfTest`].
    pub fn command(
        &self,
        build: &BuildToolSettings,
        main_class: &str,
        app_arg: Option<&str>,
    ) -> Vec<String> {
        let mut argv = vec![build.program.clone()];
        match self {
            BuiltinStage::Compile => {
                argv.extend(build.compile_goals.iter().cloned());
            }
            BuiltinStage::Launch => {
                argv.push(build.exec_goal.clone());
                argv.push(format!("-D{}={}", build.main_class_property, main_class));
            }
            BuiltinStage::SelfTest => {
                argv.push(build.exec_goal.clone());
                argv.push(format!("-D{}={}", build.main_class_property, main_class));
                if let Some(arg) = app_arg {
                    argv.push(format!("-D{}={}", build.args_property, arg));
                }
            }
        }
        if !build.quiet_flag.is_empty() {
            argv.push(build.quiet_flag.clone());
        }
        argv
    }
}

/// Configuration for a build-tool stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageConfig {
    /// Human-readable stage name.
    pub name: String,

    /// Command to execute (first element is executable).
    pub command: Vec<String>,

    /// Timeout in seconds; 0 waits indefinitely.
    pub timeout_secs: u64,

    pub stdout: OutputMode,

    pub stderr: OutputMode,

    /// Whether the child shares the terminal's stdin.
    pub interactive: bool,
}

impl StageConfig {
    /// Clean + compile with both streams captured.
    pub fn compile(build: &BuildToolSettings, timeout_secs: u64) -> Self {
        Self {
            name: BuiltinStage::Compile.name().to_string(),
            command: BuiltinStage::Compile.command(build, "", None),
            timeout_secs,
            stdout: OutputMode::Capture,
            stderr: OutputMode::Capture,
            interactive: false,
        }
    }

    /// Run the application attached to the terminal; stderr is still captured
    /// so a failure can be reported.
    pub fn launch(build: &BuildToolSettings, main_class: &str) -> Self {
        Self {
            name: BuiltinStage::Launch.name().to_string(),
            command: BuiltinStage::Launch.command(build, main_class, None),
            timeout_secs: 0,
            stdout: OutputMode::Inherit,
            stderr: OutputMode::Capture,
            interactive: true,
        }
    }

    /// Start the application with its self-test argument, detached from the
    /// terminal.
    pub fn self_test(
        build: &BuildToolSettings,
        main_class: &str,
        self_test_arg: &str,
        timeout_secs: u64,
    ) -> Self {
        Self {
            name: BuiltinStage::SelfTest.name().to_string(),
            command: BuiltinStage::SelfTest.command(build, main_class, Some(self_test_arg)),
            timeout_secs,
            stdout: OutputMode::Capture,
            stderr: OutputMode::Capture,
            interactive: false,
        }
    }

    /// Create a custom stage configuration.
    pub fn custom(name: String, command: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            name,
            command,
            timeout_secs,
            stdout: OutputMode::Capture,
            stderr: OutputMode::Capture,
            interactive: false,
        }
    }

    /// Replace the timeout (0 waits indefinitely).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_secs = timeout.map(|t| t.as_secs().max(1)).unwrap_or(0);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Command line as a single display string.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Process invocation for this stage, run from `working_dir`.
    pub fn to_command_spec(&self, working_dir: &Path) -> Result<CommandSpec, EnvError> {
        let mut spec = CommandSpec::from_argv(&self.command)?
            .current_dir(working_dir)
            .timeout(self.timeout())
            .stdout(self.stdout)
            .stderr(self.stderr);
        if self.interactive {
            spec = spec.interactive();
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stage_names() {
        assert_eq!(BuiltinStage::Compile.name(), "compile");
        assert_eq!(BuiltinStage::Launch.name(), "launch");
        assert_eq!(BuiltinStage::SelfTest.name(), "self_test");
    }

    #[test]
    fn test_compile_command() {
        let build = BuildToolSettings {
            program: "mvn".to_string(),
            ..Default::default()
        };
        let argv = BuiltinStage::Compile.command(&build, "ignored.Main", None);
        assert_eq!(argv, vec!["mvn", "clean", "compile", "-q"]);
    }

    #[test]
    fn test_launch_command_carries_main_class() {
        let build = BuildToolSettings {
            program: "mvn".to_string(),
            ..Default::default()
        };
        let argv = BuiltinStage::Launch.command(&build, "com.newsvisualizer.NewsVisualizerApp", None);
        assert_eq!(
            argv,
            vec![
                "mvn",
                "exec:java",
                "-Dexec.mainClass=com.newsvisualizer.NewsVisualizerApp",
                "-q"
            ]
        );
    }

    #[test]
    fn test_self_test_command_adds_args_property() {
        let build = BuildToolSettings {
            program: "mvn".to_string(),
            ..Default::default()
        };
        let argv = BuiltinStage::SelfTest.command(&build, "app.Main", Some("-test"));
        assert!(argv.contains(&"-Dexec.args=-test".to_string()));
        assert_eq!(argv.last().map(String::as_str), Some("-q"));
    }

    #[test]
    fn test_empty_quiet_flag_is_omitted() {
        let build = BuildToolSettings {
            program: "mvn".to_string(),
            quiet_flag: String::new(),
            ..Default::default()
        };
        let argv = BuiltinStage::Compile.command(&build, "", None);
        assert_eq!(argv, vec!["mvn", "clean", "compile"]);
    }

    #[test]
    fn test_launch_stage_is_unbounded_and_interactive() {
        let config = StageConfig::launch(&BuildToolSettings::default(), "app.Main");
        assert_eq!(config.timeout(), None);
        assert!(config.interactive);
        assert_eq!(config.stdout, OutputMode::Inherit);
        assert_eq!(config.stderr, OutputMode::Capture);
    }

    #[test]
    fn test_with_timeout() {
        let config = StageConfig::compile(&BuildToolSettings::default(), 0)
            .with_timeout(Some(Duration::from_secs(120)));
        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));

        let config = config.with_timeout(None);
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn test_to_command_spec() {
        let config = StageConfig::custom(
            "echo_test".to_string(),
            vec!["echo".to_string(), "hello".to_string()],
            60,
        );
        let spec = config.to_command_spec(Path::new("/tmp")).unwrap();
        assert_eq!(spec.program, "echo");
        assert_eq!(spec.args, vec!["hello"]);
        assert_eq!(spec.timeout, Some(Duration::from_secs(60)));
        assert_eq!(spec.working_dir.as_deref(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_to_command_spec_rejects_empty_command() {
        let config = StageConfig::custom("empty".to_string(), vec![], 0);
        assert!(config.to_command_spec(Path::new(".")).is_err());
    }
}
