//! Console configuration: buffer bound, interaction timing, frame tick

use serde::Deserialize;
use std::time::Duration;

/// Console buffer and view behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSettings {
    /// Maximum fragments kept in the buffer (0 = unbounded)
    pub max_fragments: usize,

    /// How long a view counts as "settling" after a wheel/key scroll
    pub fling_settle_ms: u64,

    /// UI redraw interval
    pub tick_ms: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            max_fragments: 10_000,
            fling_settle_ms: 300,
            tick_ms: 50,
        }
    }
}

/// Console settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileConsole {
    pub max_fragments: Option<usize>,
    pub fling_settle_ms: Option<u64>,
    pub tick_ms: Option<u64>,
}

impl ConsoleSettings {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileConsole>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            max_fragments: file.max_fragments.unwrap_or(defaults.max_fragments),
            fling_settle_ms: file.fling_settle_ms.unwrap_or(defaults.fling_settle_ms),
            // A zero tick would spin the UI loop
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms).max(1),
        }
    }

    pub fn fling_settle(&self) -> Duration {
        Duration::from_millis(self.fling_settle_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
