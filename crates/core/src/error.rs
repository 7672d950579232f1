use std::io;

/// Prefix carried by every message shown to the user
pub const TOOL_NAME: &str = "MahkrabMaker";

/// Errors that can occur while resolving and persisting a run command
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start resolver ({program}): {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("resolver exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    ResolutionFailed { code: Option<i32>, stderr: String },

    #[error("resolver did not return valid JSON: {message}")]
    MalformedOutput { message: String, raw: String },

    #[error("resolver did not include a \"full\" command")]
    IncompleteResult { raw: String },

    #[error("failed to update Code Runner settings: {0}")]
    Persist(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// One-line message for the user, prefixed with the tool name
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        let first = text.lines().next().unwrap_or_default();
        format!("{TOOL_NAME}: {first}")
    }

    /// Raw resolver stdout, when the failure came from its output
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Error::MalformedOutput { raw, .. } | Error::IncompleteResult { raw } => Some(raw),
            _ => None,
        }
    }

    /// Short stable name of the error class, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Launch { .. } => "launch",
            Error::ResolutionFailed { .. } => "resolution_failed",
            Error::MalformedOutput { .. } => "malformed_output",
            Error::IncompleteResult { .. } => "incomplete_result",
            Error::Persist(_) => "persist",
            Error::IoError(_) => "io",
            Error::ConfigError(_) => "config",
            Error::SerializationError(_) => "serialization",
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed.replace('\n', " | "))
    }
}

/// Result type alias for mahkrab operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_single_prefixed_line() {
        let err = Error::ResolutionFailed {
            code: Some(2),
            stderr: "ERROR: file not found: /tmp/x.c\nsecond line\n".to_string(),
        };
        let message = err.user_message();
        assert!(message.starts_with("MahkrabMaker: "));
        assert!(!message.contains('\n'));
        assert!(message.contains("code 2"));
        assert!(message.contains("second line"));
    }

    #[test]
    fn test_stderr_kept_verbatim_in_variant() {
        let stderr = "  boom\n".to_string();
        let err = Error::ResolutionFailed {
            code: Some(7),
            stderr: stderr.clone(),
        };
        match err {
            Error::ResolutionFailed { stderr: kept, .. } => assert_eq!(kept, stderr),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_launch_message_names_program() {
        let err = Error::Launch {
            program: "python9".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.kind(), "launch");
        assert!(err.user_message().contains("python9"));
    }

    #[test]
    fn test_raw_output_only_for_output_errors() {
        let malformed = Error::MalformedOutput {
            message: "expected value".to_string(),
            raw: "not json".to_string(),
        };
        assert_eq!(malformed.raw_output(), Some("not json"));
        assert_eq!(Error::Persist("denied".to_string()).raw_output(), None);
    }
}
