use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{CONFIG_FILE_NAME, INTERPRETER_ENV};
use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize,
    resolver::{BuiltinResolver, CommandResolver, ProcessResolver},
    sink::{
        JsonSettingsStore,
        json_store::{DEFAULT_MAP_SETTING, DEFAULT_TERMINAL_SETTING},
    },
    types::TargetLanguage,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub language: TargetLanguage,
    pub resolver: ResolverConfig,
    pub executor: ExecutorConfig,

    // Where this config was loaded from (internal, not exposed in JSON)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Which resolver runs and how it is launched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ResolverConfig {
    /// Interpreter or executable, looked up on `PATH` when not a path
    pub interpreter: String,
    /// Resolver script passed to the interpreter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
    /// Standalone resolver executable, used when no script is set,
    /// e.g. `mahkrab` with `args = ["derive"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Arguments placed before `--file` and `--cwd` when running `program`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            script: None,
            program: None,
            args: Vec::new(),
        }
    }
}

/// Where the resolved command is written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExecutorConfig {
    /// Key in the executor map; defaults to the language id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub map_setting: String,
    pub terminal_setting: String,
    pub scope: SettingsScope,
    /// Explicit settings file, bypassing `scope`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            key: None,
            map_setting: DEFAULT_MAP_SETTING.to_string(),
            terminal_setting: DEFAULT_TERMINAL_SETTING.to_string(),
            scope: SettingsScope::Workspace,
            settings_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsScope {
    /// The project's `.vscode/settings.json`, falling back to user settings
    /// when no project root is known
    #[default]
    Workspace,
    /// The editor's user settings
    User,
}

impl_case_insensitive_deserialize!(
    SettingsScope,
    Workspace => "workspace",
    User => "user"
);

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Nearest `.mahkrab.json` at or above `start_path`, stopping below `$HOME`
    /// like [`find_project_root`](super::find_project_root)
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::find_config_file_below(start_path, home.as_deref())
    }

    /// Config search that never looks in `boundary` or anything above it
    pub fn find_config_file_below(start_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
        let mut current = if start_path.is_file() {
            start_path.parent()?
        } else {
            start_path
        };

        loop {
            if boundary == Some(current) {
                return None;
            }

            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Config governing `path`: the nearest `.mahkrab.json`, or defaults,
    /// with environment overrides applied
    pub fn discover(path: &Path) -> Result<Self> {
        let config = match Self::find_config_file(path) {
            Some(config_path) => {
                tracing::debug!("Using config at: {:?}", config_path);
                Self::load_from_file(&config_path)?
            }
            None => {
                tracing::debug!("No {} above {:?}, using defaults", CONFIG_FILE_NAME, path);
                Self::default()
            }
        };
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(interpreter) = std::env::var(INTERPRETER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            tracing::debug!("{} overrides interpreter: {}", INTERPRETER_ENV, interpreter);
            self.resolver.interpreter = interpreter;
        }
        self
    }

    /// Key this tool owns in the executor map
    pub fn executor_key(&self) -> &str {
        self.executor.key.as_deref().unwrap_or(&self.language.id)
    }

    /// Resolves a path from the config file against the config's directory
    fn relative_to_source(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    pub fn resolver_script(&self) -> Option<PathBuf> {
        self.resolver
            .script
            .as_deref()
            .map(|script| self.relative_to_source(script))
    }

    /// Resolver program with a relative path taken against the config's
    /// directory; a bare name is looked up on `PATH`
    pub fn resolver_program(&self) -> Option<String> {
        let program = self.resolver.program.as_deref()?;
        let path = Path::new(program);
        if path.components().count() > 1 {
            Some(self.relative_to_source(path).to_string_lossy().into_owned())
        } else {
            Some(program.to_string())
        }
    }

    /// The configured resolver strategy: a script under the interpreter, else a
    /// standalone program, else the builtin resolver
    pub fn build_resolver(&self) -> Box<dyn CommandResolver> {
        if let Some(script) = self.resolver_script() {
            return Box::new(ProcessResolver::script(
                self.resolver.interpreter.clone(),
                script,
            ));
        }
        match self.resolver_program() {
            Some(program) => Box::new(
                self.resolver
                    .args
                    .iter()
                    .fold(ProcessResolver::new(program), |resolver, arg| {
                        resolver.with_arg(arg.clone())
                    }),
            ),
            None => Box::new(BuiltinResolver::detect()),
        }
    }

    /// Settings file the executor map lives in
    pub fn settings_path(&self, project_root: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = &self.executor.settings_path {
            return Ok(self.relative_to_source(path));
        }

        match (self.executor.scope, project_root) {
            (SettingsScope::Workspace, Some(root)) => {
                Ok(root.join(".vscode").join("settings.json"))
            }
            _ => user_settings_path(),
        }
    }

    pub fn build_store(&self, project_root: Option<&Path>) -> Result<JsonSettingsStore> {
        let path = self.settings_path(project_root)?;
        Ok(JsonSettingsStore::new(path).with_settings(
            self.executor.map_setting.clone(),
            self.executor.terminal_setting.clone(),
        ))
    }
}

/// The editor's user-level `settings.json`
pub fn user_settings_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| Error::ConfigError("Cannot locate user settings: HOME is not set".into()))?;

    let user_dir = match std::env::consts::OS {
        "macos" => home.join("Library").join("Application Support"),
        "windows" => std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join("AppData").join("Roaming")),
        _ => home.join(".config"),
    };
    Ok(user_dir.join("Code").join("User").join("settings.json"))
}
