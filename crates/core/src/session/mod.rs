//! Trigger handling: filter, resolve, persist, notify
//!
//! A [`Session`] wires the collaborators together. Each call to
//! [`Session::on_trigger`] is independent: nothing is carried between calls
//! except what the store itself persists, and a failed trigger leaves the
//! session ready for the next one.

pub mod notifier;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{
    config::{Config, working_directory},
    error::{Error, Result},
    resolver::CommandResolver,
    sink::{ExecutorMappingStore, apply_command},
    trigger::{TriggerFilter, TriggerKind},
    types::{ResolutionRequest, SourceFile},
};

pub use notifier::{ConsoleNotifier, Notice, Notifier, RecordingNotifier};

/// What a single trigger ended with
#[derive(Debug)]
pub enum TriggerOutcome {
    /// The file is not of the target language
    Skipped,
    /// The executor map now holds `command`
    Updated { command: String },
    /// Resolution or persistence failed; nothing was written
    Failed(Error),
}

impl TriggerOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, TriggerOutcome::Updated { .. })
    }
}

pub struct Session {
    filter: TriggerFilter,
    resolver: Box<dyn CommandResolver>,
    store: Box<dyn ExecutorMappingStore>,
    notifier: Box<dyn Notifier>,
    executor_key: String,
    workspace_root: Option<PathBuf>,
}

impl Session {
    pub fn new(
        filter: TriggerFilter,
        resolver: Box<dyn CommandResolver>,
        store: Box<dyn ExecutorMappingStore>,
    ) -> Self {
        let executor_key = filter.language().id.clone();
        Self {
            filter,
            resolver,
            store,
            notifier: Box::new(ConsoleNotifier),
            executor_key,
            workspace_root: None,
        }
    }

    /// Session for files under `workspace_root` as described by `config`
    pub fn from_config(config: &Config, workspace_root: Option<&Path>) -> Result<Self> {
        let store = config.build_store(workspace_root)?;
        let resolver = config.build_resolver();
        debug!(
            "session: resolver={}, settings={}",
            resolver.name(),
            store.path().display()
        );

        let mut session = Self::new(
            TriggerFilter::new(config.language.clone()),
            resolver,
            Box::new(store),
        )
        .with_executor_key(config.executor_key());
        session.workspace_root = workspace_root.map(Path::to_path_buf);
        Ok(session)
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_executor_key(mut self, key: impl Into<String>) -> Self {
        self.executor_key = key.into();
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn store(&self) -> &dyn ExecutorMappingStore {
        self.store.as_ref()
    }

    /// Builds the request for `file`: the workspace root when the file lies
    /// inside it, otherwise the file's own directory
    pub fn request_for(&self, file: &Path) -> Result<ResolutionRequest> {
        let file = std::path::absolute(file)?;
        let root = self
            .workspace_root
            .as_deref()
            .filter(|root| file.starts_with(root));
        let cwd = working_directory(&file, root);
        Ok(ResolutionRequest::new(file, cwd))
    }

    /// Runs one trigger to completion
    pub fn on_trigger(&self, kind: TriggerKind, descriptor: Option<&SourceFile>) -> TriggerOutcome {
        if !self.filter.should_resolve(kind, descriptor) {
            debug!("{}: not a {} file, skipping", kind, self.filter.language().display_name);
            return TriggerOutcome::Skipped;
        }
        // The filter never accepts a missing descriptor
        let Some(file) = descriptor else {
            return TriggerOutcome::Skipped;
        };

        info!("{}: {}", kind, file.path().display());

        match self.configure(file) {
            Ok(command) => {
                self.notifier.info(&format!(
                    "Code Runner command updated for {}.",
                    self.filter.language().display_name
                ));
                TriggerOutcome::Updated { command }
            }
            Err(e) => {
                warn!("{} failed ({}): {}", kind, e.kind(), e);
                if let Some(raw) = e.raw_output() {
                    debug!("resolver raw output: {}", raw);
                }
                self.notifier.error(&e.user_message());
                TriggerOutcome::Failed(e)
            }
        }
    }

    fn configure(&self, file: &SourceFile) -> Result<String> {
        let request = self.request_for(file.path())?;
        debug!(
            "resolving with {} resolver in {}",
            self.resolver.name(),
            request.working_directory.display()
        );

        let result = self.resolver.resolve(&request)?;
        apply_command(self.store.as_ref(), &self.executor_key, &result.command)?;
        Ok(result.command)
    }
}
