//! Process-wide console facade
//!
//! Lets code without a controller handle write to "the" console. The
//! composition root installs one controller at startup; until then every call
//! here is a no-op and `live_console_count` reports zero.
//!
//! The plain functions write at the tail; the `_at` variants take an explicit
//! [`ScrollIntent`].

use super::{ConsoleController, Fragment, ScrollIntent};
use std::sync::OnceLock;

static CONSOLE: OnceLock<ConsoleController> = OnceLock::new();

/// Install the process-wide controller.
///
/// Only the first call wins; later calls hand their controller back.
pub fn install(controller: ConsoleController) -> Result<(), ConsoleController> {
    CONSOLE.set(controller)
}

/// The installed controller, if any
pub fn installed() -> Option<&'static ConsoleController> {
    CONSOLE.get()
}

fn with_console(f: impl FnOnce(&ConsoleController)) {
    match CONSOLE.get() {
        Some(console) => f(console),
        None => tracing::trace!("console write before install, dropped"),
    }
}

pub fn write(content: impl Into<Fragment>) {
    write_at(content, ScrollIntent::ToEnd);
}

pub fn write_at(content: impl Into<Fragment>, intent: ScrollIntent) {
    with_console(|console| console.write(content, intent));
}

pub fn write_line(content: impl Into<Fragment>) {
    write_line_at(content, ScrollIntent::ToEnd);
}

pub fn write_line_at(content: impl Into<Fragment>, intent: ScrollIntent) {
    with_console(|console| console.write_line(content, intent));
}

pub fn blank_line() {
    blank_line_at(ScrollIntent::ToEnd);
}

pub fn blank_line_at(intent: ScrollIntent) {
    with_console(|console| console.blank_line(intent));
}

pub fn clear() {
    clear_at(ScrollIntent::ToEnd);
}

pub fn clear_at(intent: ScrollIntent) {
    with_console(|console| console.clear(intent));
}

/// Registered views on the installed console (0 when none is installed)
pub fn live_console_count() -> usize {
    CONSOLE.get().map_or(0, ConsoleController::live_view_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The facade is process-wide, so everything touching it lives in one test.
    #[test]
    fn test_install_once_and_write_through_facade() {
        let (console, _queue) = ConsoleController::new();
        let (second, _second_queue) = ConsoleController::new();

        assert_eq!(live_console_count(), 0);
        assert!(install(console.clone()).is_ok());
        assert!(install(second).is_err());

        write("A");
        write_line("B");
        write_at("C", ScrollIntent::ToStart);
        assert_eq!(console.render().as_str(), "CAB\n");

        clear();
        blank_line();
        assert_eq!(console.render().as_str(), "\n");

        write_line(None::<&str>);
        assert_eq!(console.render().as_str(), "\nnull\n");
        assert_eq!(live_console_count(), 0);
    }
}
