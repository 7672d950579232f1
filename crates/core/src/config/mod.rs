//! Configuration management for mahkrab

pub mod project;
mod settings;

/// File name of the per-project configuration
pub const CONFIG_FILE_NAME: &str = ".mahkrab.json";

/// Environment variable overriding `resolver.interpreter`
pub const INTERPRETER_ENV: &str = "MAHKRAB_INTERPRETER";

// Re-export main types
pub use project::{find_project_root, working_directory};
pub use settings::{Config, ExecutorConfig, ResolverConfig, SettingsScope};
