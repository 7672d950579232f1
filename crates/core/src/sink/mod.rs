//! Executor mapping persistence
//!
//! The mapping is owned by another tool's settings. This crate only ever
//! replaces the single language key it owns, always by reading the whole
//! mapping, changing that key and writing the whole mapping back.

pub mod json_store;
pub mod memory;

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    types::ExecutorMapping,
};

pub use json_store::JsonSettingsStore;
pub use memory::InMemoryStore;

/// Capability to read and write the executor mapping
pub trait ExecutorMappingStore: Send + Sync {
    /// Read the full mapping; an absent mapping reads as empty
    fn read_mapping(&self) -> Result<ExecutorMapping>;

    /// Replace the full mapping and the run-in-terminal flag as one write
    ///
    /// Either both are stored or neither is.
    fn commit(&self, mapping: &ExecutorMapping, run_in_terminal: bool) -> Result<()>;

    /// Human-readable location of the store, for messages
    fn describe(&self) -> String;
}

fn persist_error(e: Error) -> Error {
    match e {
        Error::Persist(_) => e,
        other => Error::Persist(other.to_string()),
    }
}

/// Stores `command` under `language_key`, keeping every other entry
///
/// Also switches the run-in-terminal flag on. Every store failure is reported
/// as [`Error::Persist`].
pub fn apply_command(
    store: &dyn ExecutorMappingStore,
    language_key: &str,
    command: &str,
) -> Result<()> {
    let mut mapping = store.read_mapping().map_err(persist_error)?;
    debug!(
        "executor map at {} has {} entries before update",
        store.describe(),
        mapping.len()
    );

    mapping.insert(language_key.to_string(), Value::String(command.to_string()));

    store.commit(&mapping, true).map_err(persist_error)?;

    info!("executor map entry '{}' updated in {}", language_key, store.describe());
    Ok(())
}
