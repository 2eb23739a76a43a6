//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# mineconsole configuration

# Console views opened at startup (1-{max_views})
views = {views}

[console]
# Fragments kept in memory; oldest are evicted first (0 = unbounded)
max_fragments = {max_fragments}
# Auto-scroll stays off this long after a wheel/key scroll
fling_settle_ms = {fling_settle_ms}
# UI redraw interval
tick_ms = {tick_ms}

# Background writers feeding the console
[demo]
writers = {writers}
interval_ms = {interval_ms}
lines = {lines}  # 0 = write until quit

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to console capture or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            max_views = super::MAX_VIEWS,
            views = self.views,
            max_fragments = self.console.max_fragments,
            fling_settle_ms = self.console.fling_settle_ms,
            tick_ms = self.console.tick_ms,
            writers = self.demo.writers,
            interval_ms = self.demo.interval_ms,
            lines = self.demo.lines,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
