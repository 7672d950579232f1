//! Executor mapping stored in an editor `settings.json`
//!
//! The file is a flat JSON object whose keys are dotted setting names, e.g.
//! `"code-runner.executorMap"`. Keys this store does not own are carried
//! through every rewrite unchanged and in their original order. A file that
//! does not parse as a JSON object is never overwritten.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ExecutorMappingStore;
use crate::{
    error::{Error, Result},
    types::ExecutorMapping,
};

pub const DEFAULT_MAP_SETTING: &str = "code-runner.executorMap";
pub const DEFAULT_TERMINAL_SETTING: &str = "code-runner.runInTerminal";

#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
    map_setting: String,
    terminal_setting: String,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            map_setting: DEFAULT_MAP_SETTING.to_string(),
            terminal_setting: DEFAULT_TERMINAL_SETTING.to_string(),
        }
    }

    pub fn with_settings(
        mut self,
        map_setting: impl Into<String>,
        terminal_setting: impl Into<String>,
    ) -> Self {
        self.map_setting = map_setting.into();
        self.terminal_setting = terminal_setting.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("settings file {:?} does not exist yet", self.path);
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(Error::Persist(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(Error::Persist(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
            Err(e) if has_jsonc_syntax(&contents) => Err(Error::Persist(format!(
                "{} contains comments or trailing commas that could not be parsed \
                 ({e}); remove them so the executor map can be updated",
                self.path.display()
            ))),
            Err(e) => Err(Error::Persist(format!(
                "cannot parse {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save_document(&self, document: &Map<String, Value>) -> Result<()> {
        let persist = |e: std::io::Error| {
            Error::Persist(format!("cannot write {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persist)?;
        }

        let mut contents = serde_json::to_string_pretty(document)?;
        contents.push('\n');

        // Write beside the target and rename so a failed write never truncates it
        let staging = self.path.with_extension("json.mahkrab-tmp");
        fs::write(&staging, contents).map_err(persist)?;
        fs::rename(&staging, &self.path).map_err(persist)?;
        Ok(())
    }
}

/// True when `contents` uses JSONC extensions: `//` or `/* */` comments, or a
/// trailing comma before `}` or `]`
fn has_jsonc_syntax(contents: &str) -> bool {
    let mut chars = contents.chars().peekable();
    let mut in_string = false;
    let mut pending_comma = false;

    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                pending_comma = false;
            }
            '/' if matches!(chars.peek(), Some('/') | Some('*')) => return true,
            ',' => pending_comma = true,
            '}' | ']' if pending_comma => return true,
            c if c.is_whitespace() => {}
            _ => pending_comma = false,
        }
    }
    false
}

impl ExecutorMappingStore for JsonSettingsStore {
    fn read_mapping(&self) -> Result<ExecutorMapping> {
        let document = self.load_document()?;
        match document.get(&self.map_setting) {
            None | Some(Value::Null) => Ok(ExecutorMapping::new()),
            Some(Value::Object(mapping)) => Ok(mapping.clone()),
            Some(_) => Err(Error::Persist(format!(
                "\"{}\" in {} is not an object",
                self.map_setting,
                self.path.display()
            ))),
        }
    }

    fn commit(&self, mapping: &ExecutorMapping, run_in_terminal: bool) -> Result<()> {
        let mut document = self.load_document()?;
        document.insert(self.map_setting.clone(), Value::Object(mapping.clone()));
        document.insert(self.terminal_setting.clone(), Value::Bool(run_in_terminal));
        self.save_document(&document)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
