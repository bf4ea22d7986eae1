//! Installation guidance for missing tools.
//!
//! Static data only; nothing here influences pipeline control flow.

use crate::platform::PlatformFamily;

/// Entry used when no (tool, platform) row exists.
pub const FALLBACK_INSTRUCTIONS: &[&str] = &["Check the official documentation"];

const CATALOG: &[(&str, PlatformFamily, &[&str])] = &[
    (
        "java",
        PlatformFamily::Windows,
        &[
            "Download from: https://adoptium.net/",
            "Or use: winget install EclipseAdoptium.Temurin.11",
        ],
    ),
    (
        "java",
        PlatformFamily::MacOs,
        &[
            "Install with Homebrew: brew install openjdk@11",
            "Or download from: https://adoptium.net/",
        ],
    ),
    (
        "java",
        PlatformFamily::Linux,
        &[
            "Ubuntu/Debian: sudo apt install openjdk-11-jdk",
            "CentOS/RHEL: sudo yum install java-11-openjdk-devel",
            "Or download from: https://adoptium.net/",
        ],
    ),
    (
        "maven",
        PlatformFamily::Windows,
        &[
            "Download from: https://maven.apache.org/download.cgi",
            "Or use: winget install Apache.Maven",
        ],
    ),
    (
        "maven",
        PlatformFamily::MacOs,
        &[
            "Install with Homebrew: brew install maven",
            "Or download from: https://maven.apache.org/download.cgi",
        ],
    ),
    (
        "maven",
        PlatformFamily::Linux,
        &[
            "Ubuntu/Debian: sudo apt install maven",
            "CentOS/RHEL: sudo yum install maven",
            "Or download from: https://maven.apache.org/download.cgi",
        ],
    ),
];

const ALTERNATIVES: &[(&str, &[&str])] = &[(
    "maven",
    &[
        "Use IntelliJ IDEA, Eclipse, or VS Code",
        "Import as Maven project",
    ],
)];

/// Lookup of platform-specific installation steps.
pub struct RemediationCatalog;

impl RemediationCatalog {
    /// Installation steps for `tool_id` on `platform`, in display order.
    pub fn instructions(tool_id: &str, platform: PlatformFamily) -> &'static [&'static str] {
        CATALOG
            .iter()
            .find(|(tool, family, _)| *tool == tool_id && *family == platform)
            .map(|(_, _, steps)| *steps)
            .unwrap_or(FALLBACK_INSTRUCTIONS)
    }

    /// Ways to run the project without `tool_id` installed.
    pub fn alternatives(tool_id: &str) -> &'static [&'static str] {
        ALTERNATIVES
            .iter()
            .find(|(tool, _)| *tool == tool_id)
            .map(|(_, routes)| *routes)
            .unwrap_or(&[])
    }
}
