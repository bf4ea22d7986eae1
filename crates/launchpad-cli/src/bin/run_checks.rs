//! Run the validation battery against a project.
//!
//! Exits 0 only when the success rate reaches the readiness threshold.

use anyhow::{Context, Result};
use clap::Parser;
use launchpad_ci::ValidationHarness;
use launchpad_cli::console::{render_summary, ConsoleReporter, Palette};
use launchpad_cli::{run_until_cancelled, CommonArgs};
use launchpad_core::SystemRunner;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "run-checks")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate a project and report whether it is ready to use", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Write the validation report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.common.init_tracing();
    run_until_cancelled(run(cli)).await
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.common.load_config()?;
    let palette = Palette::detect();
    let project_name = config.project.name.clone();

    let harness = ValidationHarness::from_config(
        &cli.common.project_root,
        config,
        Arc::new(SystemRunner),
    )
    .with_reporter(Arc::new(ConsoleReporter::new(palette)));

    let rule = "=".repeat(60);
    println!("{}", palette.blue(&format!("INFO: {rule}")));
    println!(
        "{}",
        palette.blue(&format!(
            "INFO: {} VALIDATION SUITE",
            project_name.to_uppercase()
        ))
    );
    println!("{}", palette.blue(&format!("INFO: {rule}")));

    let report = harness.run_all().await;
    println!("{}", render_summary(palette, &project_name, &report));

    let verdict = harness.gate().evaluate(&report);
    for violation in &verdict.violations {
        debug!(violation = %violation, "Failed check");
    }
    info!(passed = verdict.passed, "{}", verdict.message);

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(if report.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
