pub mod language;
pub mod resolution;
pub mod source_file;

// Re-export commonly used types
pub use language::TargetLanguage;
pub use resolution::{ExecutorMapping, ResolutionRequest, ResolutionResult};
pub use source_file::SourceFile;
