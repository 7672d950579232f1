use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Language identifier to command table, as stored in the settings file
///
/// Values are kept as raw JSON so entries this tool does not own survive a
/// rewrite untouched.
pub type ExecutorMapping = Map<String, Value>;

/// Input to a resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub file_path: PathBuf,
    pub working_directory: PathBuf,
}

impl ResolutionRequest {
    pub fn new(file_path: impl Into<PathBuf>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            working_directory: working_directory.into(),
        }
    }
}

/// A successfully resolved compile-and-run command
///
/// `command` is never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

impl ResolutionResult {
    /// Returns `None` when the command is blank after trimming
    pub fn new(command: &str) -> Option<Self> {
        let command = command.trim();
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_string(),
            compile: None,
            run: None,
        })
    }

    pub fn with_parts(mut self, compile: Option<String>, run: Option<String>) -> Self {
        self.compile = compile;
        self.run = run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_command_is_rejected() {
        assert!(ResolutionResult::new("").is_none());
        assert!(ResolutionResult::new("  \n\t ").is_none());
    }

    #[test]
    fn test_command_is_trimmed() {
        let result = ResolutionResult::new("  gcc a.c -o a && ./a \n").unwrap();
        assert_eq!(result.command, "gcc a.c -o a && ./a");
    }
}
