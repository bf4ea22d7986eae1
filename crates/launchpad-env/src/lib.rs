//! Launchpad-Env: toolchain and host environment layer
//!
//! This crate is the lowest layer of Launchpad. It knows how to run external
//! processes, whether the Java runtime and Maven are usable, what host it is
//! running on, and how to tell a user to install whatever is missing.
//!
//! ## Layer 1 - Environment/Tooling
//!
//! Focus: probes that never fail and a process seam that can be faked.

pub mod error;
pub mod exec;
pub mod fakes;
pub mod platform;
pub mod probe;
pub mod remediation;

pub use error::EnvError;
pub use exec::{CommandOutput, CommandRunner, CommandSpec, OutputMode, SystemRunner};
pub use platform::{PlatformFamily, PlatformInfo};
pub use probe::{
    default_maven_program, parse_version_number, ToolCheckResult, ToolProbe, ToolRequirement,
    VersionStream,
};
pub use remediation::{RemediationCatalog, FALLBACK_INSTRUCTIONS};

/// Result type for environment operations
pub type Result<T> = std::result::Result<T, EnvError>;
