//! Process execution seam.
//!
//! Every external invocation (tool probes, compilation, launch, self-test)
//! goes through [`CommandRunner`], so orchestration logic can be exercised
//! against [`crate::fakes::ScriptedRunner`] without a JDK or Maven on PATH.

use crate::error::EnvError;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

/// What happens to one output stream of the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Send to the null device.
    Discard,
    /// Collect into [`CommandOutput`].
    #[default]
    Capture,
    /// Share the parent's stream.
    Inherit,
}

impl OutputMode {
    fn to_stdio(self) -> Stdio {
        match self {
            OutputMode::Discard => Stdio::null(),
            OutputMode::Capture => Stdio::piped(),
            OutputMode::Inherit => Stdio::inherit(),
        }
    }
}

/// A single process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// `None` waits for the child indefinitely.
    pub timeout: Option<Duration>,
    pub stdout: OutputMode,
    pub stderr: OutputMode,
    /// Inherit stdin instead of closing it.
    pub interactive: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
            stdout: OutputMode::Capture,
            stderr: OutputMode::Capture,
            interactive: false,
        }
    }

    /// Build from an argv vector whose first element is the executable.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv.split_first().ok_or(EnvError::EmptyCommand)?;
        Ok(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn stdout(mut self, mode: OutputMode) -> Self {
        self.stdout = mode;
        self
    }

    pub fn stderr(mut self, mode: OutputMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Discard both output streams.
    pub fn quiet(self) -> Self {
        self.stdout(OutputMode::Discard).stderr(OutputMode::Discard)
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Whether any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Observed result of a child that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code, or -1 when terminated by a signal.
    pub exit_code: i32,

    /// Whether the child exited with a success status.
    pub success: bool,

    /// Captured stdout (empty unless the stream was captured).
    pub stdout: String,

    /// Captured stderr (empty unless the stream was captured).
    pub stderr: String,

    /// Wall time in milliseconds.
    pub duration_ms: u64,
}

impl CommandOutput {
    /// First non-blank line of stdout.
    pub fn first_stdout_line(&self) -> Option<&str> {
        first_line(&self.stdout)
    }

    /// First non-blank line of stderr.
    pub fn first_stderr_line(&self) -> Option<&str> {
        first_line(&self.stderr)
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Runs external processes.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion (or until its timeout).
    ///
    /// Returns `Ok` for any child that exited, whatever its status.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Production runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        if spec.program.is_empty() {
            return Err(EnvError::EmptyCommand);
        }

        let start = Instant::now();
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(if spec.interactive {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stdout(spec.stdout.to_stdio())
            .stderr(spec.stderr.to_stdio())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        debug!(command = %spec, "Spawning process");

        let child = command.spawn().map_err(|source| EnvError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        // Dropping the wait future on expiry drops the child, which kills it.
        let output = match spec.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| EnvError::Timeout {
                    program: spec.program.clone(),
                    secs: limit.as_secs(),
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
