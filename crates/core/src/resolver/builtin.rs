//! Resolver that derives the command in-process

use super::CommandResolver;
use crate::{
    derive::{self, Toolchain},
    error::{Error, Result},
    types::{ResolutionRequest, ResolutionResult},
};

/// Derives the compile-and-run command without spawning a resolver script
#[derive(Debug, Clone)]
pub struct BuiltinResolver {
    toolchain: Toolchain,
}

impl BuiltinResolver {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    /// Uses `$CC` or the platform's default compiler
    pub fn detect() -> Self {
        Self::new(Toolchain::detect())
    }
}

impl CommandResolver for BuiltinResolver {
    fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        let derived = derive::derive_command(
            &request.file_path,
            &request.working_directory,
            &self.toolchain,
        )?;
        tracing::debug!("builtin resolver derived: {}", derived.full);

        let derive::DerivedCommand { compile, run, full } = derived;
        ResolutionResult::new(&full)
            .map(|result| result.with_parts(Some(compile), Some(run)))
            .ok_or(Error::IncompleteResult { raw: full })
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}
