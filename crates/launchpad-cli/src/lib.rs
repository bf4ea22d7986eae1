//! Launchpad CLI support
//!
//! Shared plumbing for the two binaries:
//!
//! - `run-pipeline`: check the toolchain, compile, and launch the application
//! - `run-checks`: run the validation battery and print a readiness summary

pub mod console;

use anyhow::{Context, Result};
use clap::Args;
use launchpad_core::{init_tracing, LaunchpadConfig};
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

/// Printed when the user interrupts a run.
pub const CANCELLED_MESSAGE: &str = "Operation cancelled by user.";

/// Flags shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root (default: current directory)
    #[arg(short = 'C', long, default_value = ".")]
    pub project_root: PathBuf,

    /// Configuration file (default: <project-root>/launchpad.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json: bool,
}

impl CommonArgs {
    /// Install the tracing subscriber. `RUST_LOG` overrides the level.
    pub fn init_tracing(&self) {
        let level = if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };
        init_tracing(self.json, level);
    }

    pub fn load_config(&self) -> Result<LaunchpadConfig> {
        let config = LaunchpadConfig::load(&self.project_root, self.config.as_deref())
            .with_context(|| {
                format!(
                    "Failed to load configuration for {}",
                    self.project_root.display()
                )
            })?;
        debug!(project = %config.project.name, "Configuration loaded");
        Ok(config)
    }
}

/// Drive `work` to completion unless the user interrupts first.
///
/// Dropping `work` on interrupt kills any child it is waiting on. An
/// escaped error is reported as unexpected and maps to exit code 1.
pub async fn run_until_cancelled<F>(work: F) -> ExitCode
where
    F: Future<Output = Result<ExitCode>>,
{
    run_until_interrupted(work, tokio::signal::ctrl_c()).await
}

/// Race `work` against `interrupt`. An interrupt source that fails to
/// install leaves `work` running to completion.
async fn run_until_interrupted<F, I>(work: F, interrupt: I) -> ExitCode
where
    F: Future<Output = Result<ExitCode>>,
    I: Future<Output = std::io::Result<()>>,
{
    let palette = console::Palette::detect();

    tokio::select! {
        result = work => match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}", palette.red(&format!("Unexpected error: {e:#}")));
                ExitCode::FAILURE
            }
        },
        Ok(()) = interrupt => {
            println!();
            println!("{CANCELLED_MESSAGE}");
            ExitCode::SUCCESS
        }
    }
}
