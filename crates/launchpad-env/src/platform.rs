//! Host platform detection.

use crate::exec::{CommandRunner, CommandSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operating-system family used to key installation guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl PlatformFamily {
    /// Family of the host this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style identifier.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "windows" => PlatformFamily::Windows,
            "macos" | "darwin" => PlatformFamily::MacOs,
            "linux" => PlatformFamily::Linux,
            _ => PlatformFamily::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformFamily::Windows => "Windows",
            PlatformFamily::MacOs => "macOS",
            PlatformFamily::Linux => "Linux",
            PlatformFamily::Other => "Unknown",
        }
    }
}

/// Description of the host, shown in the launcher banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub family: PlatformFamily,
    pub os_name: String,
    /// Kernel or OS release, when it could be queried.
    pub os_version: Option<String>,
    pub arch: String,
}

impl PlatformInfo {
    /// Detect the host, querying the OS release through `runner`.
    pub async fn detect(runner: &dyn CommandRunner) -> Self {
        let family = PlatformFamily::current();
        Self {
            family,
            os_name: family.display_name().to_string(),
            os_version: query_os_version(runner, family).await,
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Host description without spawning anything.
    pub fn current() -> Self {
        let family = PlatformFamily::current();
        Self {
            family,
            os_name: family.display_name().to_string(),
            os_version: None,
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl std::fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.os_version {
            Some(version) => write!(f, "{} {} ({})", self.os_name, version, self.arch),
            None => write!(f, "{} ({})", self.os_name, self.arch),
        }
    }
}

async fn query_os_version(runner: &dyn CommandRunner, family: PlatformFamily) -> Option<String> {
    let spec = match family {
        PlatformFamily::Windows => CommandSpec::new("cmd").args(["/C", "ver"]),
        PlatformFamily::MacOs => CommandSpec::new("sw_vers").args(["-productVersion"]),
        PlatformFamily::Linux | PlatformFamily::Other => CommandSpec::new("uname").args(["-r"]),
    }
    .timeout(Some(Duration::from_secs(5)));

    match runner.run(&spec).await {
        Ok(output) if output.success => output.first_stdout_line().map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(PlatformFamily::from_os("windows"), PlatformFamily::Windows);
        assert_eq!(PlatformFamily::from_os("macos"), PlatformFamily::MacOs);
        assert_eq!(PlatformFamily::from_os("Darwin"), PlatformFamily::MacOs);
        assert_eq!(PlatformFamily::from_os("linux"), PlatformFamily::Linux);
        assert_eq!(PlatformFamily::from_os("freebsd"), PlatformFamily::Other);
    }

    #[test]
    fn test_display_with_and_without_version() {
        let mut info = PlatformInfo {
            family: PlatformFamily::Linux,
            os_name: "Linux".to_string(),
            os_version: Some("6.8.0".to_string()),
            arch: "x86_64".to_string(),
        };
        assert_eq!(info.to_string(), "Linux 6.8.0 (x86_64)");

        info.os_version = None;
        assert_eq!(info.to_string(), "Linux (x86_64)");
    }

    #[tokio::test]
    async fn test_detect_reports_host_arch() {
        let info = PlatformInfo::detect(&crate::SystemRunner).await;
        assert_eq!(info.arch, std::env::consts::ARCH);
        assert_eq!(info.family, PlatformFamily::current());
    }
}
