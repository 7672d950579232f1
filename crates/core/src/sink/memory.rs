use std::sync::{Arc, Mutex, MutexGuard};

use super::ExecutorMappingStore;
use crate::{
    error::{Error, Result},
    types::ExecutorMapping,
};

#[derive(Debug, Default)]
struct State {
    mapping: ExecutorMapping,
    run_in_terminal: Option<bool>,
    writes: usize,
    reject: Option<String>,
    reject_flag: Option<String>,
}

/// Executor mapping kept in memory
///
/// Clones share the same state, so a caller can hand one clone to a session
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn with_mapping(mapping: ExecutorMapping) -> Self {
        let store = Self::default();
        store.lock().mapping = mapping;
        store
    }

    /// Make every following write fail with `reason`
    pub fn reject_writes(&self, reason: impl Into<String>) {
        self.lock().reject = Some(reason.into());
    }

    /// Make every following commit that switches the terminal flag on fail
    /// with `reason`
    pub fn reject_terminal_flag(&self, reason: impl Into<String>) {
        self.lock().reject_flag = Some(reason.into());
    }

    pub fn mapping(&self) -> ExecutorMapping {
        self.lock().mapping.clone()
    }

    pub fn run_in_terminal(&self) -> Option<bool> {
        self.lock().run_in_terminal
    }

    /// Number of successful commits
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ExecutorMappingStore for InMemoryStore {
    fn read_mapping(&self) -> Result<ExecutorMapping> {
        Ok(self.lock().mapping.clone())
    }

    fn commit(&self, mapping: &ExecutorMapping, run_in_terminal: bool) -> Result<()> {
        let mut state = self.lock();
        let rejection = match (&state.reject, &state.reject_flag) {
            (Some(reason), _) => Some(reason),
            (None, Some(reason)) if run_in_terminal => Some(reason),
            _ => None,
        };
        if let Some(reason) = rejection {
            return Err(Error::Persist(reason.clone()));
        }
        state.mapping = mapping.clone();
        state.run_in_terminal = Some(run_in_terminal);
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory settings".to_string()
    }
}
