//! Command resolution
//!
//! A resolver turns a [`ResolutionRequest`] into a [`ResolutionResult`] or a
//! typed error. The real strategy lives behind [`CommandResolver`] so an
//! external script, this crate's builtin derivation or a test double can be
//! swapped freely.

pub mod builtin;
pub mod process;

use serde_json::Value;

use crate::{
    error::{Error, Result},
    types::{ResolutionRequest, ResolutionResult},
};

pub use builtin::BuiltinResolver;
pub use process::ProcessResolver;

/// Field of the resolver output carrying the compile-and-run command
pub const COMMAND_FIELD: &str = "full";

/// Core trait that all resolvers implement
pub trait CommandResolver: Send + Sync {
    /// Resolve a run command for the request, synchronously
    fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Interprets a resolver's stdout
///
/// Output that is not JSON is `MalformedOutput`. JSON without a non-blank
/// string in `full` is `IncompleteResult`.
pub fn parse_resolver_output(stdout: &str) -> Result<ResolutionResult> {
    let payload: Value = serde_json::from_str(stdout).map_err(|e| Error::MalformedOutput {
        message: e.to_string(),
        raw: stdout.to_string(),
    })?;

    let incomplete = || Error::IncompleteResult {
        raw: stdout.to_string(),
    };

    let command = payload
        .get(COMMAND_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(incomplete)?;
    let result = ResolutionResult::new(command).ok_or_else(incomplete)?;

    let part = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
    Ok(result.with_parts(part("compile"), part("run")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_command_accepted() {
        let result = parse_resolver_output(r#"{"full":"gcc a.c -o a && ./a"}"#).unwrap();
        assert_eq!(result.command, "gcc a.c -o a && ./a");
        assert_eq!(result.compile, None);
    }

    #[test]
    fn test_trailing_newline_tolerated_and_parts_kept() {
        let stdout = "{\"compile\": \"gcc a.c -o a\", \"run\": \"./a\", \"full\": \"gcc a.c -o a && ./a\"}\n";
        let result = parse_resolver_output(stdout).unwrap();
        assert_eq!(result.compile.as_deref(), Some("gcc a.c -o a"));
        assert_eq!(result.run.as_deref(), Some("./a"));
    }

    #[test]
    fn test_blank_or_missing_full_is_incomplete() {
        for stdout in [r#"{"full":"   "}"#, "{}", r#"{"full":null}"#, r#"{"full":42}"#, "[]", "\"full\""] {
            match parse_resolver_output(stdout) {
                Err(Error::IncompleteResult { raw }) => assert_eq!(raw, stdout),
                other => panic!("{stdout}: expected IncompleteResult, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_json_is_malformed_with_raw_text() {
        let err = parse_resolver_output("not json").unwrap_err();
        assert_eq!(err.kind(), "malformed_output");
        assert_eq!(err.raw_output(), Some("not json"));
    }

    #[test]
    fn test_empty_stdout_is_malformed() {
        assert!(matches!(
            parse_resolver_output(""),
            Err(Error::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_two_objects_is_malformed() {
        assert!(matches!(
            parse_resolver_output("{\"full\":\"a\"}\n{\"full\":\"b\"}"),
            Err(Error::MalformedOutput { .. })
        ));
    }
}
