use anyhow::{Context, Result};
use std::{env, path::Path};

use mahkrab_core::{Config, config::CONFIG_FILE_NAME};

pub fn init_command(cwd: Option<&Path>, force: bool, script: Option<&Path>) -> Result<()> {
    let project_root = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    config.resolver.script = script.map(Path::to_path_buf);
    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    match &config.resolver.script {
        Some(script) => println!(
            "   🐍 Resolver: {} {}",
            config.resolver.interpreter,
            script.display()
        ),
        None => println!("   🦀 Resolver: builtin"),
    }
    println!(
        "   📄 Settings: {}",
        config.settings_path(Some(&project_root))?.display()
    );

    Ok(())
}
