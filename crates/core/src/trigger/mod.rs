//! Trigger filtering
//!
//! Every trigger source (active view changed, document saved, startup with a
//! file already open) goes through the same [`TriggerFilter::matches`] check.

use serde::Serialize;
use std::fmt;

use crate::impl_case_insensitive_deserialize;
use crate::types::{SourceFile, TargetLanguage};

/// The event that asked for a reconfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TriggerKind {
    ActiveChanged,
    Saved,
    Startup,
}

impl_case_insensitive_deserialize!(
    TriggerKind,
    ActiveChanged => "active",
    Saved => "save",
    Startup => "startup"
);

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [
        TriggerKind::ActiveChanged,
        TriggerKind::Saved,
        TriggerKind::Startup,
    ];

    pub fn describe(&self) -> &'static str {
        match self {
            TriggerKind::ActiveChanged => "active editor changed",
            TriggerKind::Saved => "file saved",
            TriggerKind::Startup => "initial configure on startup",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Decides whether a file should cause resolution to run
#[derive(Debug, Clone)]
pub struct TriggerFilter {
    language: TargetLanguage,
}

impl TriggerFilter {
    pub fn new(language: TargetLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> &TargetLanguage {
        &self.language
    }

    /// True iff the declared language tag is the target tag or the path carries
    /// the target's source extension. A missing descriptor never matches.
    pub fn matches(&self, descriptor: Option<&SourceFile>) -> bool {
        let Some(file) = descriptor else {
            return false;
        };

        if file.language_id.as_deref() == Some(self.language.id.as_str()) {
            return true;
        }

        file.extension() == Some(self.language.extension.as_str())
    }

    /// Filter entry point used by every trigger kind
    pub fn should_resolve(&self, kind: TriggerKind, descriptor: Option<&SourceFile>) -> bool {
        let matched = self.matches(descriptor);
        tracing::trace!(
            "trigger {:?} for {:?}: {}",
            kind,
            descriptor.map(SourceFile::path),
            if matched { "accepted" } else { "ignored" }
        );
        matched
    }
}

impl Default for TriggerFilter {
    fn default() -> Self {
        Self::new(TargetLanguage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> TriggerFilter {
        TriggerFilter::default()
    }

    #[test]
    fn test_missing_descriptor_is_ignored() {
        assert!(!filter().matches(None));
    }

    #[test]
    fn test_language_tag_matches() {
        let file = SourceFile::new("/tmp/untitled").with_language_id("c");
        assert!(filter().matches(Some(&file)));
    }

    #[test]
    fn test_extension_matches_without_tag() {
        assert!(filter().matches(Some(&SourceFile::new("/tmp/main.c"))));
    }

    #[test]
    fn test_extension_matches_even_with_other_tag() {
        let file = SourceFile::new("/tmp/main.c").with_language_id("plaintext");
        assert!(filter().matches(Some(&file)));
    }

    #[test]
    fn test_other_files_are_ignored() {
        let f = filter();
        for path in ["/tmp/main.cpp", "/tmp/header.h", "/tmp/Makefile", "/tmp/c", "/tmp/a.C"] {
            assert!(!f.matches(Some(&SourceFile::new(path))), "{path} should not match");
        }
        let tagged = SourceFile::new("/tmp/main.py").with_language_id("python");
        assert!(!f.matches(Some(&tagged)));
    }

    #[test]
    fn test_all_trigger_kinds_agree() {
        let f = filter();
        let descriptors = [
            None,
            Some(SourceFile::new("/tmp/a.c")),
            Some(SourceFile::new("/tmp/a.rs")),
            Some(SourceFile::new("/tmp/a").with_language_id("c")),
            Some(SourceFile::new("/tmp/a.txt").with_language_id("cpp")),
        ];

        for descriptor in &descriptors {
            let expected = f.matches(descriptor.as_ref());
            for kind in TriggerKind::ALL {
                assert_eq!(f.should_resolve(kind, descriptor.as_ref()), expected);
            }
        }
    }

    #[test]
    fn test_trigger_kind_deserializes_case_insensitively() {
        let kind: TriggerKind = serde_json::from_str("\"SAVE\"").unwrap();
        assert_eq!(kind, TriggerKind::Saved);
        assert!(serde_json::from_str::<TriggerKind>("\"close\"").is_err());
    }
}
