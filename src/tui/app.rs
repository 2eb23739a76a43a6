// TUI application state
//
// Holds the open console views, which one has focus, and transient UI state
// (toast, quit flag). All mutations go through `App::apply`, which runs on
// the UI thread, so console writes made here refresh the views immediately.

use super::clipboard;
use super::console_view::ConsoleView;
use super::input::Action;
use super::toast::Toast;
use crate::config::MAX_VIEWS;
use crate::console::{ConsoleController, ScrollIntent};
use std::time::{Duration, Instant};

/// Main application state for the TUI
pub struct App {
    console: ConsoleController,

    /// Open views, left to right
    pub views: Vec<ConsoleView>,

    /// Index into `views` of the focused view
    pub focused: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Transient status message
    pub toast: Option<Toast>,

    /// Settle window handed to new views
    settle: Duration,

    /// Notes written at the head so far
    head_notes: usize,
}

impl App {
    /// Create the app with `views` views already open
    pub fn new(console: ConsoleController, views: usize, settle: Duration) -> Self {
        let mut app = Self {
            console,
            views: Vec::new(),
            focused: 0,
            should_quit: false,
            toast: None,
            settle,
            head_notes: 0,
        };
        for _ in 0..views.clamp(1, MAX_VIEWS) {
            app.views.push(ConsoleView::new(&app.console, settle));
        }
        app
    }

    pub fn console(&self) -> &ConsoleController {
        &self.console
    }

    pub fn focused_view(&self) -> Option<&ConsoleView> {
        self.views.get(self.focused)
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Instant::now()));
    }

    pub fn focus_next(&mut self) {
        if !self.views.is_empty() {
            self.focused = (self.focused + 1) % self.views.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.views.is_empty() {
            self.focused = (self.focused + self.views.len() - 1) % self.views.len();
        }
    }

    /// Open another view to the right; refused at `MAX_VIEWS`
    pub fn open_view(&mut self) -> bool {
        if self.views.len() >= MAX_VIEWS {
            self.show_toast(format!("At most {MAX_VIEWS} views"));
            return false;
        }
        let view = ConsoleView::new(&self.console, self.settle);
        tracing::info!("Opened view {}", view.id());
        self.views.push(view);
        self.focused = self.views.len() - 1;
        true
    }

    /// Close the focused view; the last view stays open
    ///
    /// Dropping the view is what unregisters it; the controller notices on
    /// its next refresh pass.
    pub fn close_focused(&mut self) -> bool {
        if self.views.len() <= 1 {
            self.show_toast("Last view stays open");
            return false;
        }
        let view = self.views.remove(self.focused);
        tracing::info!("Closed view {}", view.id());
        drop(view);
        if self.focused >= self.views.len() {
            self.focused = self.views.len() - 1;
        }
        true
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::Scroll(motion) => {
                if let Some(view) = self.focused_view() {
                    view.user_scroll(motion, now);
                }
            }
            Action::Touch(touching) => {
                if let Some(view) = self.focused_view() {
                    view.set_touching(touching);
                }
            }
            Action::TogglePin => {
                if let Some(view) = self.focused_view() {
                    view.set_touching(!view.is_touching());
                }
            }
            Action::Clear => self.console.clear(ScrollIntent::ToEnd),
            Action::WriteAtHead => {
                self.head_notes += 1;
                self.console.write_line(
                    format!("note {} written at the head", self.head_notes),
                    ScrollIntent::ToStart,
                );
            }
            Action::BlankLine => self.console.blank_line(ScrollIntent::ToEnd),
            Action::Copy => self.copy_console(),
            Action::OpenView => {
                self.open_view();
            }
            Action::CloseView => {
                self.close_focused();
            }
        }
    }

    fn copy_console(&mut self) {
        let rendered = self.console.render();
        match clipboard::copy_to_clipboard(rendered.as_str()) {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }
}
