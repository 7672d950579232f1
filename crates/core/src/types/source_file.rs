use std::path::{Path, PathBuf};

/// A file reported by a trigger source
///
/// Built fresh for every trigger and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Language tag declared by the host, if it knows one
    pub language_id: Option<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            language_id: None,
        }
    }

    pub fn with_language_id(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = Some(language_id.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension of the path without the leading dot
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}
