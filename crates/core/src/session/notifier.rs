use std::sync::{Arc, Mutex};

use crate::error::TOOL_NAME;

/// Where user-visible messages go
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prefixes `message` with the tool name unless it already is
pub fn prefixed(message: &str) -> String {
    let prefix = format!("{TOOL_NAME}: ");
    if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}{message}")
    }
}

/// Prints info to stdout and errors to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("✅ {}", prefixed(message));
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", prefixed(message));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Keeps every message; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    fn push(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.push(Notice::Info(prefixed(message)));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(prefixed(message)));
    }
}
