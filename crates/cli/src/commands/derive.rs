use anyhow::{Context, Result};
use std::path::Path;

use mahkrab_core::{
    Error,
    derive::{self, Toolchain},
};

/// Prints `{"compile": .., "run": .., "full": ..}` for the file, the same
/// contract an external resolver script follows
pub fn derive_command(file: &Path, cwd: &Path) -> Result<()> {
    let toolchain = Toolchain::detect();

    match derive::derive_command(file, cwd, &toolchain) {
        Ok(derived) => {
            let json = serde_json::to_string(&derived).context("Failed to encode command")?;
            println!("{json}");
            Ok(())
        }
        Err(Error::ResolutionFailed { code, stderr }) => {
            eprintln!("{stderr}");
            std::process::exit(code.unwrap_or(1));
        }
        Err(e) => Err(e.into()),
    }
}
