// mineconsole - append-only in-app console with any number of live views
//
// Architecture:
// - Console: shared line buffer plus a controller that fans refreshes out
//   to registered views, coalescing bursts from background threads
// - Logging: tracing layer that writes log lines into the console
// - TUI (ratatui): side-by-side console views with scroll and touch handling
// - Demo: background writer threads feeding the console

pub mod cli;
pub mod config;
pub mod console;
pub mod demo;
pub mod logging;
pub mod tui;
