// Logging module - tracing capture into the console
//
// This module provides a tracing layer that writes every log event into a
// console controller as one styled line. In TUI mode this keeps logs from
// breaking through the alternate screen, and makes them show up in every
// open console view.

use crate::console::{ConsoleController, Fragment, ScrollIntent};
use chrono::{DateTime, Local};
use ratatui::style::{Color, Modifier, Style};
use std::fmt::Write as _;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Events from the console core are not captured; writing them back into the
/// console would feed its own refresh passes.
const CONSOLE_TARGET: &str = "mineconsole::console";

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Get the display string for this log level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            LogLevel::Warn => Style::default().fg(Color::Yellow),
            LogLevel::Info => Style::default().fg(Color::Green),
            LogLevel::Debug => Style::default().fg(Color::Blue),
            LogLevel::Trace => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Build the fragments of one captured log line (without the line break)
pub fn format_log_line(timestamp: DateTime<Local>, level: LogLevel, message: &str) -> Vec<Fragment> {
    vec![
        Fragment::styled(
            format!("[{}] ", timestamp.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Fragment::styled(format!("{:5}", level.as_str()), level.style()),
        Fragment::plain(format!(" {message}")),
    ]
}

/// Tracing layer that writes events into a console
pub struct ConsoleLayer {
    console: ConsoleController,
}

impl ConsoleLayer {
    pub fn new(console: ConsoleController) -> Self {
        Self { console }
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(CONSOLE_TARGET) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = LogLevel::from(metadata.level());
        let line = format_log_line(Local::now(), level, &visitor.finish());
        self.console.write_line_parts(line, ScrollIntent::ToEnd);
    }
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
            // Remove the quotes that Debug adds
            if self.message.len() >= 2 && self.message.starts_with('"') && self.message.ends_with('"')
            {
                self.message = self.message[1..self.message.len() - 1].to_string();
            }
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_log_line_layout() {
        let timestamp = Local.with_ymd_and_hms(2024, 1, 15, 9, 5, 7).unwrap();
        let parts = format_log_line(timestamp, LogLevel::Warn, "disk almost full");
        let text: String = parts.iter().map(Fragment::text).collect();
        assert_eq!(text, "[09:05:07] WARN  disk almost full");
        assert_eq!(parts[1].style(), LogLevel::Warn.style());
    }

    #[test]
    fn test_layer_writes_events_as_lines() {
        let (console, _queue) = ConsoleController::new();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(console.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("first");
            tracing::error!(code = 7, "second");
        });

        let rendered = console.render();
        let lines: Vec<&str> = rendered.as_str().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO  first"));
        assert!(lines[1].ends_with("ERROR second code=7"));
        assert!(rendered.as_str().ends_with('\n'));
    }

    #[test]
    fn test_layer_skips_console_internals() {
        let (console, _queue) = ConsoleController::new();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(console.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "mineconsole::console::controller", "pruned");
        });

        assert!(console.render().is_empty());
    }
}
