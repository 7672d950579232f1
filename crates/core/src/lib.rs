//! mahkrab - keeps a "run" command for C files in sync with the file being edited
//!
//! This crate provides functionality to:
//! - Decide whether a reported file is a C source worth reconfiguring for
//! - Resolve a compile-and-run shell command for it, through an external
//!   resolver script or the builtin derivation
//! - Write that command into Code Runner's executor map without disturbing
//!   other languages' entries
pub mod config;
pub mod derive;
pub mod error;
pub mod resolver;
pub mod session;
pub mod sink;
pub mod trigger;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use resolver::{BuiltinResolver, CommandResolver, ProcessResolver, parse_resolver_output};
pub use session::{Session, TriggerOutcome};
pub use sink::{ExecutorMappingStore, InMemoryStore, JsonSettingsStore, apply_command};
pub use trigger::{TriggerFilter, TriggerKind};
