//! Check the toolchain, compile the project, and launch the application.
//!
//! Exits 0 only when the application ran and exited successfully.

use anyhow::Result;
use clap::Parser;
use launchpad_ci::BuildOrchestrator;
use launchpad_cli::console::{render_banner, ConsoleReporter, Palette};
use launchpad_cli::{run_until_cancelled, CommonArgs};
use launchpad_core::{PlatformInfo, SystemRunner};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "run-pipeline")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check the toolchain, compile and launch the application", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.common.init_tracing();
    run_until_cancelled(run(cli.common)).await
}

async fn run(args: CommonArgs) -> Result<ExitCode> {
    let config = args.load_config()?;
    let palette = Palette::detect();
    let runner = Arc::new(SystemRunner);

    let platform = PlatformInfo::detect(runner.as_ref()).await;
    println!("{}", render_banner(palette, &config.project.name, &platform));

    let outcome = BuildOrchestrator::new(runner, config, &args.project_root, platform)
        .with_reporter(Arc::new(ConsoleReporter::new(palette)))
        .run()
        .await;

    info!(run_id = %outcome.run_id, status = ?outcome.status, "Pipeline complete");

    Ok(if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
