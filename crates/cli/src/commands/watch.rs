use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher, event::ModifyKind};
use std::{
    env,
    path::{Path, PathBuf},
    sync::mpsc,
};
use tracing::{debug, warn};

use mahkrab_core::{Config, Session, SourceFile, TriggerKind, TriggerOutcome};

/// True for events that leave new file contents behind
pub fn is_save_event(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Paths an event reports as saved
pub fn saved_paths(event: &Event) -> Vec<PathBuf> {
    if !is_save_event(&event.kind) {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|path| path.is_file())
        .cloned()
        .collect()
}

pub fn watch_command(dir: Option<&Path>, active: Option<&Path>) -> Result<()> {
    let root = match dir {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", root.display()))?;

    let config = Config::discover(&root)?;
    let session = Session::from_config(&config, Some(&root))?;

    println!(
        "👀 Watching {} for {} files (Ctrl-C to stop)",
        root.display(),
        config.language.display_name
    );
    println!("   📄 Settings: {}", session.store().describe());

    if let Some(active) = active {
        let file = std::path::absolute(active)
            .with_context(|| format!("Failed to resolve {}", active.display()))?;
        report(session.on_trigger(TriggerKind::Startup, Some(&SourceFile::new(file))));
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;

    // Events are handled one at a time, in arrival order
    for res in rx {
        match res {
            Ok(event) => {
                debug!("watch event: {:?}", event);
                for path in saved_paths(&event) {
                    report(session.on_trigger(TriggerKind::Saved, Some(&SourceFile::new(path))));
                }
            }
            Err(e) => warn!("watch error: {}", e),
        }
    }

    Ok(())
}

fn report(outcome: TriggerOutcome) {
    if let TriggerOutcome::Updated { command } = outcome {
        println!("   🔧 {}", command);
    }
}
