use anyhow::{Context, Result};
use std::{env, path::Path};

use mahkrab_core::{Config, ExecutorMappingStore, config::find_project_root};

use crate::display::print_mapping;

pub fn show_command(path: Option<&Path>, json: bool) -> Result<()> {
    let start = match path {
        Some(p) => std::path::absolute(p)
            .with_context(|| format!("Failed to resolve {}", p.display()))?,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let config = Config::discover(&start)?;
    let store = config.build_store(find_project_root(&start).as_deref())?;
    let mapping = store.read_mapping()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
    } else {
        print_mapping(&mapping, config.executor_key(), &store.describe());
    }

    Ok(())
}
