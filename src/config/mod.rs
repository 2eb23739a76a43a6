//! Configuration for the console demo shell
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/mineconsole/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by `cli::RunOverrides`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod console;
mod demo;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use console::{ConsoleSettings, FileConsole};
pub use demo::{DemoConfig, FileDemo};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on simultaneously open views
pub const MAX_VIEWS: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Console views opened at startup
    pub views: usize,

    /// Whether to run the TUI (headless prints the buffer instead)
    pub enable_tui: bool,

    /// Console buffer and view behaviour
    pub console: ConsoleSettings,

    /// Background writers feeding the console
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            views: 2,
            enable_tui: true,
            console: ConsoleSettings::default(),
            demo: DemoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub views: Option<usize>,

    /// Optional [console] section
    pub console: Option<FileConsole>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/mineconsole/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mineconsole").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Config is optional; failing to write the template is not an error
        let _ = Self::default().write_to(&path);
    }

    /// Write this config as TOML, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Parse a config file body
    pub(crate) fn parse_file_config(contents: &str, path: &Path) -> Result<FileConfig> {
        toml::from_str(contents).with_context(|| {
            format!(
                "Failed to parse {}\n\n  Check for missing quotes, invalid booleans (use true/false)\n  or typos in section names. Delete the file to reset.",
                path.display()
            )
        })
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is an error:
    /// a broken config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file config with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Views: env > file > default
        let views = env("MINECONSOLE_VIEWS")
            .and_then(|v| v.parse().ok())
            .or(file.views)
            .unwrap_or(defaults.views)
            .clamp(1, MAX_VIEWS);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("MINECONSOLE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let console = ConsoleSettings::from_file(file.console);
        let demo = DemoConfig::from_file(file.demo);

        // Log level: env > file > default
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("MINECONSOLE_LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            views,
            enable_tui,
            console,
            demo,
            logging,
        }
    }
}
