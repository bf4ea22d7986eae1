//! In-memory fakes for the process seam (testing only)
//!
//! `ScriptedRunner` answers invocations from a list of rules and records every
//! `CommandSpec` it receives, so tests can assert which phases actually ran.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::EnvError;
use crate::exec::{CommandOutput, CommandRunner, CommandSpec};
use crate::Result;

/// Canned answer for a matched invocation.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// The child ran and exited with `code`.
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The executable could not be found.
    NotFound,
    /// The child outlived its timeout.
    Timeout,
}

impl ScriptedResponse {
    pub fn ok() -> Self {
        Self::exit(0)
    }

    pub fn exit(code: i32) -> Self {
        Self::Exit {
            code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn with_stdout(code: i32, stdout: &str) -> Self {
        Self::Exit {
            code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn with_stderr(code: i32, stderr: &str) -> Self {
        Self::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    arg: Option<String>,
    response: ScriptedResponse,
}

impl Rule {
    fn matches(&self, spec: &CommandSpec) -> bool {
        self.program == spec.program && self.arg.as_deref().map_or(true, |a| spec.has_arg(a))
    }
}

/// Rule-driven fake runner. Unmatched programs behave as missing from PATH.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every invocation of `program`.
    pub fn on(mut self, program: &str, response: ScriptedResponse) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            arg: None,
            response,
        });
        self
    }

    /// Answer invocations of `program` carrying `arg`. Checked in insertion
    /// order, so register specific rules before catch-all ones.
    pub fn on_arg(mut self, program: &str, arg: &str, response: ScriptedResponse) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            arg: Some(arg.to_string()),
            response,
        });
        self
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations of `program` that carried `arg`.
    pub fn count_with_arg(&self, program: &str, arg: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|spec| spec.program == program && spec.has_arg(arg))
            .count()
    }

    /// Number of invocations of `program`.
    pub fn count(&self, program: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|spec| spec.program == program)
            .count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());

        let response = self
            .rules
            .iter()
            .find(|rule| rule.matches(spec))
            .map(|rule| rule.response.clone())
            .unwrap_or(ScriptedResponse::NotFound);

        match response {
            ScriptedResponse::Exit {
                code,
                stdout,
                stderr,
            } => Ok(CommandOutput {
                exit_code: code,
                success: code == 0,
                stdout,
                stderr,
                duration_ms: 0,
            }),
            ScriptedResponse::NotFound => Err(EnvError::Spawn {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
            ScriptedResponse::Timeout => Err(EnvError::Timeout {
                program: spec.program.clone(),
                secs: spec.timeout.map(|t| t.as_secs()).unwrap_or(0),
            }),
        }
    }
}
