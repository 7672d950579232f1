//! Resolver backed by an external program

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::{CommandResolver, parse_resolver_output};
use crate::{
    error::{Error, Result},
    types::{ResolutionRequest, ResolutionResult},
};

/// Runs `<program> [leading args] --file <path> --cwd <dir>` inside `<dir>`
/// and reads a JSON object from its stdout.
#[derive(Debug, Clone)]
pub struct ProcessResolver {
    program: String,
    leading_args: Vec<String>,
}

impl ProcessResolver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// An interpreter running a resolver script, e.g. `python main.py`
    pub fn script(interpreter: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        let script: PathBuf = script.into();
        Self::new(interpreter).with_arg(script.to_string_lossy())
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    fn build_command(&self, request: &ResolutionRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg("--file")
            .arg(&request.file_path)
            .arg("--cwd")
            .arg(&request.working_directory)
            .current_dir(&request.working_directory);
        cmd
    }
}

impl CommandResolver for ProcessResolver {
    fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionResult> {
        debug!("preparing to call resolver");
        debug!("  program    = {}", self.program);
        debug!("  args       = {:?}", self.leading_args);
        debug!("  file       = {}", request.file_path.display());
        debug!("  cwd        = {}", request.working_directory.display());

        let output = self
            .build_command(request)
            .output()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("resolver stdout: {}", stdout);
        debug!("resolver stderr: {}", stderr);
        debug!("resolver status: {:?}", output.status.code());

        if !output.status.success() {
            return Err(Error::ResolutionFailed {
                code: output.status.code(),
                stderr: stderr.into_owned(),
            });
        }

        parse_resolver_output(&stdout)
    }

    fn name(&self) -> &'static str {
        "process"
    }
}
