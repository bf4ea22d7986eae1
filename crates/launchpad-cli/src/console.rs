//! Console rendering for progress, remediation and summaries.

use launchpad_ci::{
    CheckOutcome, PhaseResult, PipelineOutcome, PipelineReporter, PipelineStatus,
    ReadinessVerdict, Remediation, Step, ValidationReport, ValidationReporter,
};
use launchpad_core::{PlatformInfo, ToolCheckResult, ToolRequirement};
use std::io::IsTerminal;

const RULE_WIDTH: usize = 50;
const SUMMARY_RULE_WIDTH: usize = 60;

/// ANSI colouring, disabled for non-terminals and when `NO_COLOR` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("91", text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("92", text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint("93", text)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint("94", text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint("96", text)
    }
}

/// Launcher banner followed by the host description.
pub fn render_banner(palette: Palette, project_name: &str, platform: &PlatformInfo) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let title = format!("{:^width$}", project_name.to_uppercase(), width = RULE_WIDTH);
    let subtitle = format!("{:^width$}", "Launchpad", width = RULE_WIDTH);
    [
        String::new(),
        palette.blue(&rule),
        palette.blue(title.trim_end()),
        palette.cyan(subtitle.trim_end()),
        palette.blue(&rule),
        String::new(),
        format!("Operating System: {platform}"),
        String::new(),
    ]
    .join("\n")
}

/// Remediation block for a failed pipeline, headline first.
pub fn render_remediation(palette: Palette, remediation: &Remediation) -> String {
    let mut lines = vec![palette.red(&format!("[ERROR] {}", remediation.headline)), String::new()];

    if let Some(diagnostics) = &remediation.diagnostics {
        let diagnostics = diagnostics.trim_end();
        if !diagnostics.is_empty() {
            lines.push("Error output:".to_string());
            lines.push(diagnostics.to_string());
            lines.push(String::new());
        }
    }

    if !remediation.steps.is_empty() {
        lines.push(remediation.steps_heading.clone());
        lines.extend(remediation.steps.iter().map(|s| format!("  - {s}")));
        lines.push(String::new());
    }

    if !remediation.alternatives.is_empty() {
        lines.push("Alternative ways to run the project:".to_string());
        lines.extend(
            remediation
                .alternatives
                .iter()
                .enumerate()
                .map(|(i, a)| format!("  {}. {a}", i + 1)),
        );
        lines.push(String::new());
    }

    if let Some(command) = &remediation.suggested_command {
        lines.push(format!("Try running: {command}"));
        lines.push("to see detailed error messages.".to_string());
    }

    lines.join("\n")
}

fn log_line(palette: Palette, status: &str, message: &str) -> String {
    let text = format!("{status}: {message}");
    match status {
        "PASS" => palette.green(&text),
        "FAIL" => palette.red(&text),
        "WARN" => palette.yellow(&text),
        _ => palette.blue(&text),
    }
}

/// `INFO/PASS/FAIL/WARN` summary for a finished validation run.
pub fn render_summary(palette: Palette, project_name: &str, report: &ValidationReport) -> String {
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);
    let name = project_name.to_uppercase();
    let mut lines = vec![
        log_line(palette, "INFO", &rule),
        log_line(palette, "INFO", "SUMMARY"),
        log_line(palette, "INFO", &rule),
        log_line(
            palette,
            "INFO",
            &format!("Passed: {}/{} checks", report.passed_count, report.total_count),
        ),
        log_line(
            palette,
            "INFO",
            &format!("Success Rate: {:.1}%", report.success_percent()),
        ),
    ];

    match report.verdict {
        ReadinessVerdict::Ready => {
            lines.push(log_line(palette, "PASS", &format!("{name} IS READY TO USE!")));
            lines.push(log_line(
                palette,
                "INFO",
                "All major functionality and UI improvements have been verified.",
            ));
            lines.push(log_line(
                palette,
                "INFO",
                "You can now launch the application using: run-pipeline",
            ));
        }
        ReadinessVerdict::NeedsAttention => {
            lines.push(log_line(palette, "WARN", &format!("{name} HAS SOME ISSUES")));
            lines.push(log_line(
                palette,
                "INFO",
                "Most functionality works but some improvements may be needed.",
            ));
        }
        ReadinessVerdict::NotReady => {
            lines.push(log_line(palette, "FAIL", &format!("{name} HAS SIGNIFICANT ISSUES")));
            lines.push(log_line(
                palette,
                "INFO",
                "Please review failed checks and fix issues before using.",
            ));
        }
    }

    lines.push(log_line(palette, "INFO", &rule));
    lines.join("\n")
}

/// Prints pipeline and validation progress to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    palette: Palette,
}

impl ConsoleReporter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl PipelineReporter for ConsoleReporter {
    fn tool_check_started(&self, step: Step, tool: &ToolRequirement) {
        println!(
            "{}",
            self.palette
                .yellow(&format!("{step} Checking {} installation...", tool.label))
        );
    }

    fn tool_check_finished(&self, result: &ToolCheckResult) {
        if result.available {
            println!(
                "{}",
                self.palette
                    .green(&format!("[OK] {} found", result.tool.label))
            );
            if let Some(version) = &result.version_string {
                println!("{version}");
            }
        }
        println!();
    }

    fn compile_started(&self, step: Step, _command_line: &str) {
        println!(
            "{}",
            self.palette
                .yellow(&format!("{step} Compiling and launching application..."))
        );
        println!();
        println!("Please wait while the project compiles...");
    }

    fn compile_finished(&self, result: &PhaseResult) {
        if result.passed() {
            println!(
                "{}",
                self.palette
                    .green("[SUCCESS] Project compiled successfully!")
            );
            println!();
        }
    }

    fn launch_started(&self, _entry_point: &str, notes: &[String]) {
        println!("Launching application...");
        println!();
        if !notes.is_empty() {
            for note in notes {
                println!("{note}");
            }
            println!();
        }
        println!("The application window should open shortly...");
        println!();
    }

    fn launch_finished(&self, result: &PhaseResult) {
        if result.passed() {
            println!();
            println!("Application has been closed.");
        }
    }

    fn pipeline_finished(&self, outcome: &PipelineOutcome) {
        if let Some(remediation) = &outcome.remediation {
            println!();
            println!("{}", render_remediation(self.palette, remediation));
            if outcome.status == PipelineStatus::HaltedMissingTool {
                println!();
                println!("After installation, restart your terminal and try again.");
            }
        }
    }
}

impl ValidationReporter for ConsoleReporter {
    fn check_started(&self, _id: &str, description: &str) {
        println!(
            "{}",
            log_line(self.palette, "INFO", &format!("Checking {description}..."))
        );
    }

    fn check_finished(&self, outcome: &CheckOutcome) {
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        println!("{}", log_line(self.palette, status, &outcome.detail));
        for warning in &outcome.warnings {
            println!("{}", log_line(self.palette, "WARN", warning));
        }
        println!();
    }
}
