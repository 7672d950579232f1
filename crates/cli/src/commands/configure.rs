use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use mahkrab_core::{
    Config, Session, SourceFile, TriggerKind, TriggerOutcome, config::find_project_root,
};

pub fn configure_command(
    filepath: &Path,
    language_id: Option<String>,
    kind: TriggerKind,
    cwd: Option<&Path>,
) -> Result<()> {
    let file = std::path::absolute(filepath)
        .with_context(|| format!("Failed to resolve {}", filepath.display()))?;

    let config = Config::discover(&file)?;
    let workspace_root = match cwd {
        Some(dir) => Some(
            std::path::absolute(dir)
                .with_context(|| format!("Failed to resolve {}", dir.display()))?,
        ),
        None => find_project_root(&file),
    };
    debug!("workspace root: {:?}", workspace_root);

    let session = Session::from_config(&config, workspace_root.as_deref())?;

    let mut source = SourceFile::new(&file);
    if let Some(id) = language_id {
        source = source.with_language_id(id);
    }

    match session.on_trigger(kind, Some(&source)) {
        TriggerOutcome::Skipped => {
            println!(
                "⏭️  {} is not a {} file, nothing to do",
                file.display(),
                config.language.display_name
            );
        }
        TriggerOutcome::Updated { command } => {
            println!("   🔑 {}: {}", config.executor_key(), command);
            println!("   📄 {}", session.store().describe());
        }
        TriggerOutcome::Failed(_) => {
            // Already reported to the user by the session
            std::process::exit(1);
        }
    }

    Ok(())
}
