use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mahkrab_core::TriggerKind;

use crate::commands::{
    configure_command, derive_command, init_command, show_command, watch_command,
};

#[derive(Parser, Debug)]
#[command(name = "mahkrab")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug               Enable debug logging\n    MAHKRAB_INTERPRETER=python3  Override the resolver interpreter\n    MAHKRAB_PROJECT_ROOT=DIR     Pin the project root\n    CC=clang                     Compiler used by the builtin resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Trigger kinds as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriggerArg {
    Active,
    Save,
    Startup,
}

impl From<TriggerArg> for TriggerKind {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::Active => TriggerKind::ActiveChanged,
            TriggerArg::Save => TriggerKind::Saved,
            TriggerArg::Startup => TriggerKind::Startup,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the run command for a file and write it to Code Runner's settings
    #[command(visible_alias = "c")]
    Configure {
        /// Source file that became active or was saved
        filepath: PathBuf,

        /// Language id declared by the editor for this file
        #[arg(short, long)]
        language_id: Option<String>,

        /// Event that fired
        #[arg(short, long, value_enum, default_value_t = TriggerArg::Save)]
        trigger: TriggerArg,

        /// Workspace root (defaults to the nearest project root)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
    /// Watch a directory and reconfigure whenever a C file is saved
    #[command(visible_alias = "w")]
    Watch {
        /// Directory to watch (defaults to the current directory)
        dir: Option<PathBuf>,

        /// File already open when watching starts
        #[arg(short, long)]
        active: Option<PathBuf>,
    },
    /// Print the compile-and-run command for a C file as JSON
    Derive {
        /// C source file
        #[arg(long)]
        file: PathBuf,

        /// Working directory the command runs from
        #[arg(long)]
        cwd: PathBuf,
    },
    /// Show the executor map currently stored in the settings file
    Show {
        /// File or directory whose settings to read (defaults to the current directory)
        path: Option<PathBuf>,

        /// Print raw JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Write a default .mahkrab.json
    Init {
        /// Directory to initialize (defaults to the current directory)
        #[arg(short, long)]
        cwd: Option<PathBuf>,

        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,

        /// Resolver script to configure instead of the builtin resolver
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Configure {
                filepath,
                language_id,
                trigger,
                cwd,
            } => configure_command(&filepath, language_id, trigger.into(), cwd.as_deref()),
            Commands::Watch { dir, active } => watch_command(dir.as_deref(), active.as_deref()),
            Commands::Derive { file, cwd } => derive_command(&file, &cwd),
            Commands::Show { path, json } => show_command(path.as_deref(), json),
            Commands::Init { cwd, force, script } => {
                init_command(cwd.as_deref(), force, script.as_deref())
            }
        }
    }
}
