//! Demo writer configuration

use serde::Deserialize;
use std::time::Duration;

/// Background writers feeding the console
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Number of writer threads
    pub writers: usize,

    /// Delay between two lines of one writer
    pub interval_ms: u64,

    /// Lines per writer (0 = until shutdown; headless mode uses 20 instead)
    pub lines: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            writers: 2,
            interval_ms: 250,
            lines: 0,
        }
    }
}

/// Demo settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub writers: Option<usize>,
    pub interval_ms: Option<u64>,
    pub lines: Option<usize>,
}

impl DemoConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDemo>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            writers: file.writers.unwrap_or(defaults.writers),
            interval_ms: file.interval_ms.unwrap_or(defaults.interval_ms),
            lines: file.lines.unwrap_or(defaults.lines),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
