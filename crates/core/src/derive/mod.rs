//! In-process derivation of a compile-and-run command for a C file
//!
//! This is the strategy the external resolver script implements, available
//! without spawning anything. `mahkrab derive` exposes it with the same
//! `--file/--cwd` arguments and JSON output, so it can also stand in as the
//! resolver script.

pub mod flags;
pub mod shell;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use flags::{collect_linker_flags, read_linker_flags};

/// Directory under the working directory that receives executables
pub const BUILD_DIR: &str = "build";

/// Exit code used when the request itself is invalid
pub const INVALID_REQUEST_CODE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Linux,
    MacOs,
    Windows,
}

impl HostPlatform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => HostPlatform::MacOs,
            "windows" => HostPlatform::Windows,
            _ => HostPlatform::Linux,
        }
    }

    fn default_compiler(&self) -> &'static str {
        match self {
            HostPlatform::MacOs => "cc",
            _ => "gcc",
        }
    }
}

/// Compiler and platform the command is derived for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler: String,
    pub platform: HostPlatform,
}

impl Toolchain {
    pub fn new(compiler: impl Into<String>, platform: HostPlatform) -> Self {
        Self {
            compiler: compiler.into(),
            platform,
        }
    }

    /// `$CC` when set and non-empty, otherwise the platform default
    pub fn detect() -> Self {
        let platform = HostPlatform::current();
        let compiler = std::env::var("CC")
            .ok()
            .filter(|cc| !cc.trim().is_empty())
            .unwrap_or_else(|| platform.default_compiler().to_string());
        Self { compiler, platform }
    }
}

/// The three command strings a resolver reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedCommand {
    pub compile: String,
    pub run: String,
    pub full: String,
}

/// Makes `path` absolute, expanding a leading `~`
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    Ok(std::path::absolute(expanded)?)
}

/// Checks that the file exists and the working directory is a directory
///
/// Failures use the same shape an external resolver produces: exit code 2 and
/// an `ERROR:` diagnostic.
pub fn validate(file: &Path, cwd: &Path) -> Result<()> {
    if !file.exists() {
        return Err(Error::ResolutionFailed {
            code: Some(INVALID_REQUEST_CODE),
            stderr: format!("ERROR: file not found: {}", file.display()),
        });
    }
    if !cwd.is_dir() {
        return Err(Error::ResolutionFailed {
            code: Some(INVALID_REQUEST_CODE),
            stderr: format!("ERROR: cwd not a directory: {}", cwd.display()),
        });
    }
    Ok(())
}

/// Builds the command strings for an absolute source path and working directory
pub fn compose(file: &Path, cwd: &Path, flags: &[String], toolchain: &Toolchain) -> DerivedCommand {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let exe_name = match toolchain.platform {
        HostPlatform::Windows => format!("{stem}.exe"),
        _ => stem,
    };
    let build_dir = cwd.join(BUILD_DIR);
    let exe_path = build_dir.join(&exe_name);

    let q_cwd = shell::quote(&cwd.to_string_lossy());
    let q_build = shell::quote(&build_dir.to_string_lossy());
    let q_src = shell::quote(&file.to_string_lossy());
    let q_exe = shell::quote(&exe_path.to_string_lossy());

    let flag_suffix = if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", flags.join(" "))
    };

    let compile = format!("{} {q_src} -o {q_exe}{flag_suffix}", toolchain.compiler);
    let run = match toolchain.platform {
        HostPlatform::Windows => q_exe,
        _ => {
            let relative = Path::new(BUILD_DIR).join(&exe_name);
            format!("./{}", shell::quote(&relative.to_string_lossy()))
        }
    };
    let full = format!("cd {q_cwd} && mkdir -p {q_build} && {compile} && {run}");

    DerivedCommand { compile, run, full }
}

/// Validates the request, scans the file's includes and composes the command
pub fn derive_command(file: &Path, cwd: &Path, toolchain: &Toolchain) -> Result<DerivedCommand> {
    let file = absolutize(file)?;
    let cwd = absolutize(cwd)?;
    validate(&file, &cwd)?;

    let flags = read_linker_flags(&file);
    tracing::debug!("linker flags for {:?}: {:?}", file, flags);
    Ok(compose(&file, &cwd, &flags, toolchain))
}
