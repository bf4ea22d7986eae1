//! Integration tests for the validation harness against on-disk fixtures.

use async_trait::async_trait;
use launchpad_ci::validation::{
    BuildCheck, DataDirectoryCheck, LaunchReadinessCheck, MarkerCheck, StructureCheck,
};
use launchpad_ci::{Check, CheckContext, CheckOutcome, ReadinessVerdict, ValidationHarness};
use launchpad_core::{CheckSpec, LaunchpadConfig, Marker};
use launchpad_env::fakes::{ScriptedResponse, ScriptedRunner};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const SOURCE_ROOT: &str = "src/main/java/com/newsvisualizer";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project tree satisfying every default structure and marker check.
fn complete_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "pom.xml", "<project></project>");
    write(
        root,
        "launch.py",
        "def check_command(cmd):\n    pass\nprint('Operating System:')\n\
         run('mvn exec:java -Dexec.mainClass=com.newsvisualizer.NewsVisualizerApp')\n",
    );
    write(root, &format!("{SOURCE_ROOT}/NewsVisualizerApp.java"), "class NewsVisualizerApp {}");
    write(
        root,
        &format!("{SOURCE_ROOT}/gui/MainWindow.java"),
        "setSize(1800, 1200);\nsetMinimumSize(new Dimension(1600, 900));\n\
         new JTextArea(8, 120); // columns for even wider text\n\
         new Font(\"SansSerif\", Font.PLAIN, 18);\ntable.setRowHeight(55);\n",
    );
    write(
        root,
        &format!("{SOURCE_ROOT}/gui/NewsAppPanel.java"),
        "void showArticleSummaryDialog() {}\n// Enhanced custom cell renderer\n\
         String hint = \"Double-click to open • Right-click for full summary\";\n\
         setPreferredSize(new Dimension(900, 600));\n",
    );
    dir
}

fn context(root: &Path, runner: ScriptedRunner) -> CheckContext {
    let mut config = LaunchpadConfig::default();
    config.build.program = "mvn".to_string();
    CheckContext {
        project_root: root.to_path_buf(),
        config,
        runner: Arc::new(runner),
    }
}

fn letters_spec(threshold: usize) -> CheckSpec {
    CheckSpec {
        id: "letters".to_string(),
        description: "Letter markers".to_string(),
        artifact: PathBuf::from("Letters.java"),
        markers: ["A", "B", "C", "D", "E"]
            .iter()
            .map(|l| Marker::new(l, &[&format!("marker{l}")]))
            .collect(),
        threshold,
    }
}

/// Test: structure passes when all files exist and names what is missing
#[tokio::test]
async fn test_structure_check() {
    let project = complete_project();
    let ctx = context(project.path(), ScriptedRunner::new());
    let check = StructureCheck::new(ctx.config.checks.required_paths.clone());

    let outcome = check.run(&ctx).await.unwrap();
    assert!(outcome.passed, "{}", outcome.detail);

    fs::remove_file(project.path().join("launch.py")).unwrap();
    let outcome = check.run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert!(outcome.detail.contains("launch.py"));
    assert!(!outcome.detail.contains("pom.xml"));
}

/// Test: four of five markers meet a threshold of four, three do not
#[tokio::test]
async fn test_marker_threshold() {
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), ScriptedRunner::new());
    let check = MarkerCheck::new(letters_spec(4));

    write(dir.path(), "Letters.java", "markerA markerB markerC markerD");
    let outcome = check.run(&ctx).await.unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.matched_markers, vec!["A", "B", "C", "D"]);

    write(dir.path(), "Letters.java", "markerA markerB markerC");
    let outcome = check.run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert_eq!(outcome.matched_markers, vec!["A", "B", "C"]);
}

/// Test: missing artifact is a failed outcome, not an error
#[tokio::test]
async fn test_marker_check_missing_artifact() {
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), ScriptedRunner::new());

    let outcome = MarkerCheck::new(letters_spec(1)).run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert!(outcome.detail.contains("Letters.java"));
    assert!(outcome.matched_markers.is_empty());
}

/// Test: database files are optional
#[tokio::test]
async fn test_data_directory_never_fails() {
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), ScriptedRunner::new());
    let check = DataDirectoryCheck::new();

    let outcome = check.run(&ctx).await.unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.warnings.len(), 1);

    fs::create_dir(dir.path().join("data")).unwrap();
    let outcome = check.run(&ctx).await.unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.warnings.len(), 1);

    write(dir.path(), "data/news.db", "");
    write(dir.path(), "data/notes.txt", "");
    let outcome = check.run(&ctx).await.unwrap();
    assert!(outcome.passed);
    assert!(outcome.warnings.is_empty());
    assert!(outcome.detail.contains("news.db"));
    assert!(!outcome.detail.contains("notes.txt"));
}

/// Test: a self-test start that outlives its timeout passes
#[tokio::test]
async fn test_launch_readiness_timeout_passes() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on_arg("mvn", "exec:java", ScriptedResponse::Timeout);
    let ctx = context(dir.path(), runner);

    let outcome = LaunchReadinessCheck::new().run(&ctx).await.unwrap();
    assert!(outcome.passed, "{}", outcome.detail);
}

/// Test: class resolution errors fail the startup check
#[tokio::test]
async fn test_launch_readiness_class_not_found_fails() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on_arg(
        "mvn",
        "exec:java",
        ScriptedResponse::with_stderr(
            1,
            "java.lang.ClassNotFoundException: com.newsvisualizer.NewsVisualizerApp",
        ),
    );
    let ctx = context(dir.path(), runner);

    let outcome = LaunchReadinessCheck::new().run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert!(outcome.detail.contains("ClassNotFoundException"));
}

/// Test: a non-zero exit without a resolution signature still passes
#[tokio::test]
async fn test_launch_readiness_other_exit_passes() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on_arg(
        "mvn",
        "exec:java",
        ScriptedResponse::with_stderr(1, "java.awt.HeadlessException"),
    );
    let ctx = context(dir.path(), runner);

    let outcome = LaunchReadinessCheck::new().run(&ctx).await.unwrap();
    assert!(outcome.passed);
}

/// Test: compile outliving its bound fails the build check
#[tokio::test]
async fn test_build_check_timeout_fails() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(ScriptedRunner::new().on_arg("mvn", "compile", ScriptedResponse::Timeout));
    let mut ctx = context(dir.path(), ScriptedRunner::new());
    ctx.runner = runner.clone();

    let outcome = BuildCheck::new().run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert!(outcome.detail.contains("timed out"));
    assert_eq!(runner.calls()[0].timeout, Some(Duration::from_secs(120)));
}

/// Test: non-zero compile exit fails the build check
#[tokio::test]
async fn test_build_check_non_zero_exit_fails() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on_arg(
        "mvn",
        "compile",
        ScriptedResponse::with_stderr(1, "[ERROR] COMPILATION ERROR"),
    );
    let ctx = context(dir.path(), runner);

    let outcome = BuildCheck::new().run(&ctx).await.unwrap();
    assert!(!outcome.passed);
    assert!(outcome.detail.contains("COMPILATION ERROR"));
}

/// Test: both bounded checks pass their configured limits to the runner
#[tokio::test]
async fn test_bounded_checks_carry_configured_timeouts() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(
        ScriptedRunner::new()
            .on_arg("mvn", "compile", ScriptedResponse::ok())
            .on_arg("mvn", "exec:java", ScriptedResponse::Timeout),
    );
    let mut ctx = context(dir.path(), ScriptedRunner::new());
    ctx.runner = runner.clone();

    assert!(BuildCheck::new().run(&ctx).await.unwrap().passed);
    assert!(LaunchReadinessCheck::new().run(&ctx).await.unwrap().passed);

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].has_arg("compile"));
    assert_eq!(calls[0].timeout, Some(Duration::from_secs(120)));
    assert!(calls[1].has_arg("-Dexec.args=-test"));
    assert_eq!(calls[1].timeout, Some(Duration::from_secs(30)));
}

/// Test: a custom launch timeout reaches the self-test invocation
#[tokio::test]
async fn test_launch_readiness_uses_configured_timeout() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(ScriptedRunner::new().on_arg("mvn", "exec:java", ScriptedResponse::ok()));
    let mut ctx = context(dir.path(), ScriptedRunner::new());
    ctx.runner = runner.clone();
    ctx.config.checks.launch_timeout_secs = 5;

    LaunchReadinessCheck::new().run(&ctx).await.unwrap();
    assert_eq!(runner.calls()[0].timeout, Some(Duration::from_secs(5)));
}

struct FailingCheck;

#[async_trait]
impl Check for FailingCheck {
    fn id(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "Always errors"
    }

    async fn run(&self, _ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        anyhow::bail!("disk on fire")
    }
}

struct PanickingCheck;

#[async_trait]
impl Check for PanickingCheck {
    fn id(&self) -> &str {
        "panicking"
    }

    fn description(&self) -> &str {
        "Always panics"
    }

    async fn run(&self, _ctx: &CheckContext) -> anyhow::Result<CheckOutcome> {
        panic!("unexpected state")
    }
}

/// Test: errors and panics become failed outcomes and later checks still run
#[tokio::test]
async fn test_erroring_checks_are_contained() {
    let project = complete_project();
    let ctx = context(project.path(), ScriptedRunner::new());
    let structure = StructureCheck::new(ctx.config.checks.required_paths.clone());

    let harness = ValidationHarness::new(
        ctx,
        vec![
            Box::new(FailingCheck),
            Box::new(PanickingCheck),
            Box::new(structure),
        ],
    );
    let report = harness.run_all().await;

    assert_eq!(report.total_count, 3);
    assert_eq!(report.passed_count, 1);

    let failing = report.outcome("failing").unwrap();
    assert!(!failing.passed);
    assert!(failing.detail.contains("disk on fire"));

    let panicking = report.outcome("panicking").unwrap();
    assert!(!panicking.passed);
    assert!(panicking.detail.contains("unexpected state"));

    assert!(report.outcome("project_structure").unwrap().passed);
}

/// Test: full default battery on a healthy project
#[tokio::test]
async fn test_default_battery_on_complete_project() {
    let project = complete_project();
    let runner = ScriptedRunner::new()
        .on("java", ScriptedResponse::with_stderr(0, "openjdk version \"17.0.2\""))
        .on_arg("mvn", "compile", ScriptedResponse::ok())
        .on_arg("mvn", "exec:java", ScriptedResponse::Timeout);
    let ctx = context(project.path(), runner);

    let harness = ValidationHarness::from_config(ctx.project_root, ctx.config, ctx.runner);
    assert_eq!(harness.check_ids().len(), 8);

    let report = harness.run_all().await;
    let failed: Vec<&str> = report.failed().map(|o| o.id.as_str()).collect();
    assert!(failed.is_empty(), "unexpected failures: {failed:?}");
    assert_eq!(report.passed_count, 8);
    assert_eq!(report.success_rate, 1.0);
    assert_eq!(report.verdict, ReadinessVerdict::Ready);
}

/// Test: six of eight is 75% and not ready
#[tokio::test]
async fn test_default_battery_six_of_eight() {
    let project = complete_project();
    let runner = ScriptedRunner::new()
        .on("java", ScriptedResponse::with_stderr(0, "openjdk version \"17.0.2\""))
        .on_arg("mvn", "compile", ScriptedResponse::with_stderr(1, "[ERROR] build failure"))
        .on_arg("mvn", "exec:java", ScriptedResponse::Timeout);
    write(
        project.path(),
        &format!("{SOURCE_ROOT}/gui/NewsAppPanel.java"),
        "// nothing here yet",
    );
    let ctx = context(project.path(), runner);

    let report = ValidationHarness::from_config(ctx.project_root, ctx.config, ctx.runner)
        .run_all()
        .await;

    let failed: Vec<&str> = report.failed().map(|o| o.id.as_str()).collect();
    assert_eq!(failed, vec!["compilation", "panel_enhancements"]);
    assert_eq!(report.passed_count, 6);
    assert_eq!(report.total_count, 8);
    assert_eq!(format!("{:.1}", report.success_percent()), "75.0");
    assert!(!report.is_ready());
}

/// Test: empty project fails most checks without aborting the run
#[tokio::test]
async fn test_default_battery_on_empty_directory() {
    let dir = TempDir::new().unwrap();
    let ctx = context(dir.path(), ScriptedRunner::new());

    let report = ValidationHarness::from_config(ctx.project_root, ctx.config, ctx.runner)
        .run_all()
        .await;

    assert_eq!(report.total_count, 8);
    assert!(report.outcome("database_files").unwrap().passed);
    assert!(!report.outcome("project_structure").unwrap().passed);
    assert!(!report.outcome("toolchain_java").unwrap().passed);
    assert_eq!(report.verdict, ReadinessVerdict::NotReady);
}
