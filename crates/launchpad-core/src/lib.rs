//! Launchpad Core Library
//!
//! Shared configuration, error types and tracing setup for the Launchpad
//! pipeline and validation crates. Re-exports the environment layer so
//! downstream crates need a single import path.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{
    BuildToolSettings, CheckSettings, CheckSpec, LaunchpadConfig, Marker, ProjectSettings,
    CONFIG_FILE_NAME,
};
pub use error::{ConfigError, Result};
pub use telemetry::init_tracing;

pub use launchpad_env::{
    CommandOutput, CommandRunner, CommandSpec, EnvError, OutputMode, PlatformFamily,
    PlatformInfo, RemediationCatalog, SystemRunner, ToolCheckResult, ToolProbe, ToolRequirement,
    VersionStream,
};
