use serde::{Deserialize, Serialize};

/// The language whose run command this tool keeps up to date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLanguage {
    /// Canonical language tag, e.g. `c`
    pub id: String,
    /// Canonical source extension without the dot
    pub extension: String,
    /// Name used in user-facing messages
    pub display_name: String,
}

impl TargetLanguage {
    pub fn c() -> Self {
        Self {
            id: "c".to_string(),
            extension: "c".to_string(),
            display_name: "C".to_string(),
        }
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::c()
    }
}
