//! Console view - one on-screen instance of the console
//!
//! A view owns the strong handle to its shared state; the controller's
//! registry only holds a weak one. Dropping the view is all it takes to
//! unregister: the next refresh pass prunes it.
//!
//! # Scroll scheduling
//!
//! After each re-render the view may schedule one full scroll (to the start or
//! end). The scroll is applied on the next layout pass, which also clears the
//! "scheduled" flag. Until then further requests are ignored, so a burst of
//! refreshes between two frames scrolls once. Nothing is scheduled while the
//! user is interacting (touching, or settling after a wheel scroll).

use super::interaction::Interaction;
use super::scroll::ScrollState;
use super::wrap::wrap_text;
use crate::console::{ConsoleController, ConsoleSurface, Rendered, ScrollIntent, ViewId};
use ratatui::text::Line;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct ViewInner {
    rendered: Rendered,
    rows: Vec<Line<'static>>,
    scroll: ScrollState,
    interaction: Interaction,
    /// A full scroll is waiting for the next layout pass
    full_scroll_scheduled: bool,
    pending_scroll: Option<ScrollIntent>,
    renders: usize,
    /// Bumped whenever `rendered` changes
    version: u64,
    /// (version, width) that `rows` were wrapped for
    wrapped_for: Option<(u64, u16)>,
    wraps: usize,
}

impl ViewInner {
    fn schedule_scroll(&mut self, intent: ScrollIntent, now: Instant) {
        if self.interaction.is_interacting(now) || self.full_scroll_scheduled {
            return;
        }
        self.pending_scroll = Some(intent);
        self.full_scroll_scheduled = true;
    }
}

struct ViewState {
    inner: Mutex<ViewInner>,
}

impl ViewState {
    fn lock(&self) -> MutexGuard<'_, ViewInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConsoleSurface for ViewState {
    fn render_and_scroll(&self, rendered: &Rendered, intent: ScrollIntent) {
        let mut inner = self.lock();
        inner.rendered = rendered.clone();
        inner.renders += 1;
        inner.version += 1;
        inner.schedule_scroll(intent, Instant::now());
    }
}

/// One registered console view
pub struct ConsoleView {
    id: ViewId,
    state: Arc<ViewState>,
}

impl ConsoleView {
    /// Create, register, render the current buffer, and schedule a scroll to
    /// the end
    pub fn new(controller: &ConsoleController, settle: Duration) -> Self {
        let state = Arc::new(ViewState {
            inner: Mutex::new(ViewInner {
                rendered: Rendered::default(),
                rows: Vec::new(),
                scroll: ScrollState::new(),
                interaction: Interaction::new(settle),
                full_scroll_scheduled: false,
                pending_scroll: None,
                renders: 0,
                version: 0,
                wrapped_for: None,
                wraps: 0,
            }),
        });
        let id = controller.register(&state);

        {
            let mut inner = state.lock();
            inner.rendered = controller.render();
            inner.version += 1;
            inner.schedule_scroll(ScrollIntent::ToEnd, Instant::now());
        }

        Self { id, state }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Currently displayed text
    pub fn text(&self) -> String {
        self.state.lock().rendered.as_str().to_string()
    }

    /// Refresh passes received since creation
    pub fn render_count(&self) -> usize {
        self.state.lock().renders
    }

    /// Times the rows were re-wrapped by `layout`
    pub fn wrap_count(&self) -> usize {
        self.state.lock().wraps
    }

    pub fn is_scroll_scheduled(&self) -> bool {
        self.state.lock().full_scroll_scheduled
    }

    /// Recompute rows for a `width` x `height` viewport, then run any
    /// scheduled full scroll. Call once per frame before drawing.
    ///
    /// Rows are only re-wrapped when the content or the width changed.
    pub fn layout(&self, width: u16, height: u16) {
        let mut inner = self.state.lock();
        let key = (inner.version, width);
        if inner.wrapped_for != Some(key) {
            let rows = wrap_text(&inner.rendered.to_text(), width as usize);
            inner.rows = rows;
            inner.wrapped_for = Some(key);
            inner.wraps += 1;
        }
        let total = inner.rows.len();
        inner.scroll.update_dimensions(total, height as usize);

        if let Some(intent) = inner.pending_scroll.take() {
            match intent {
                ScrollIntent::ToStart => inner.scroll.scroll_to_start(),
                ScrollIntent::ToEnd => inner.scroll.scroll_to_end(),
            }
        }
        inner.full_scroll_scheduled = false;
    }

    /// Rows inside the viewport as of the last layout
    pub fn visible_rows(&self) -> Vec<Line<'static>> {
        let inner = self.state.lock();
        let (start, end) = inner.scroll.visible_range();
        inner.rows.get(start..end).map(<[_]>::to_vec).unwrap_or_default()
    }

    /// Scroll position as of the last layout
    pub fn scroll(&self) -> ScrollState {
        self.state.lock().scroll.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // User interaction
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_touching(&self, touching: bool) {
        self.state.lock().interaction.set_touching(touching);
    }

    pub fn is_touching(&self) -> bool {
        self.state.lock().interaction.is_touching()
    }

    pub fn is_user_interacting(&self, now: Instant) -> bool {
        self.state.lock().interaction.is_interacting(now)
    }

    /// Scroll by user input; starts the settle window
    pub fn user_scroll(&self, motion: ScrollMotion, now: Instant) {
        let mut inner = self.state.lock();
        inner.interaction.fling(now);
        let scroll = &mut inner.scroll;
        match motion {
            ScrollMotion::LineUp => scroll.scroll_up(),
            ScrollMotion::LineDown => scroll.scroll_down(),
            ScrollMotion::PageUp => scroll.page_up(),
            ScrollMotion::PageDown => scroll.page_down(),
            ScrollMotion::Start => scroll.scroll_to_start(),
            ScrollMotion::End => scroll.scroll_to_end(),
        }
    }
}

/// A user-driven scroll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMotion {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Start,
    End,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SETTLE: Duration = Duration::from_millis(300);

    fn lines(n: usize) -> String {
        (0..n).map(|i| format!("line {i}\n")).collect()
    }

    #[test]
    fn test_new_view_registers_and_shows_existing_content() {
        let (console, _queue) = ConsoleController::new();
        console.write("before", ScrollIntent::ToEnd);

        let view = ConsoleView::new(&console, SETTLE);
        assert_eq!(console.live_view_count(), 1);
        assert_eq!(view.text(), "before");
        assert!(view.is_scroll_scheduled());
    }

    #[test]
    fn test_initial_layout_scrolls_to_end() {
        let (console, _queue) = ConsoleController::new();
        console.write(lines(20), ScrollIntent::ToEnd);

        let view = ConsoleView::new(&console, SETTLE);
        view.layout(40, 5);

        // 20 lines plus the empty row after the final break
        assert_eq!(view.scroll().total(), 21);
        assert!(view.scroll().at_end());
        assert!(!view.is_scroll_scheduled());
    }

    #[test]
    fn test_write_at_head_scrolls_to_start() {
        let (console, _queue) = ConsoleController::new();
        console.write(lines(20), ScrollIntent::ToEnd);
        let view = ConsoleView::new(&console, SETTLE);
        view.layout(40, 5);

        console.write_line("top", ScrollIntent::ToStart);
        view.layout(40, 5);

        // Head write_line lands as "\n" + "top", in front of "line 0\n"
        assert_eq!(view.scroll().offset(), 0);
        let rows = view.visible_rows();
        let row_text = |i: usize| -> String {
            rows[i].spans.iter().map(|span| span.content.as_ref()).collect()
        };
        assert_eq!(row_text(0), "");
        assert_eq!(row_text(1), "topline 0");
    }

    #[test]
    fn test_scroll_scheduled_once_until_layout() {
        let (console, _queue) = ConsoleController::new();
        let view = ConsoleView::new(&console, SETTLE);
        view.layout(40, 5);

        console.write("a", ScrollIntent::ToStart);
        assert!(view.is_scroll_scheduled());
        // Second request before layout is ignored; the first intent wins
        console.write(lines(30), ScrollIntent::ToEnd);
        view.layout(40, 5);
        assert_eq!(view.scroll().offset(), 0);
        assert_eq!(view.render_count(), 2);

        console.write("b", ScrollIntent::ToEnd);
        view.layout(40, 5);
        assert!(view.scroll().at_end());
    }

    #[test]
    fn test_no_auto_scroll_while_touching() {
        let (console, _queue) = ConsoleController::new();
        console.write(lines(20), ScrollIntent::ToEnd);
        let view = ConsoleView::new(&console, SETTLE);
        view.layout(40, 5);
        view.user_scroll(ScrollMotion::Start, Instant::now());
        view.set_touching(true);

        console.write(lines(5), ScrollIntent::ToEnd);
        assert!(!view.is_scroll_scheduled());
        view.layout(40, 5);
        assert_eq!(view.scroll().offset(), 0);
        // Text still refreshed
        assert!(view.text().ends_with("line 4\n"));
        assert_eq!(view.scroll().total(), 26);
    }

    #[test]
    fn test_no_auto_scroll_while_settling() {
        let (console, _queue) = ConsoleController::new();
        console.write(lines(20), ScrollIntent::ToEnd);
        let view = ConsoleView::new(&console, Duration::from_secs(60));
        view.layout(40, 5);
        view.user_scroll(ScrollMotion::PageUp, Instant::now());
        let offset = view.scroll().offset();

        console.write_line("more", ScrollIntent::ToEnd);
        view.layout(40, 5);
        assert_eq!(view.scroll().offset(), offset);
        assert!(view.is_user_interacting(Instant::now()));
    }

    #[test]
    fn test_layout_rewraps_only_on_change() {
        let (console, _queue) = ConsoleController::new();
        console.write(lines(20), ScrollIntent::ToEnd);
        let view = ConsoleView::new(&console, SETTLE);

        view.layout(40, 5);
        view.layout(40, 5);
        view.layout(40, 8);
        assert_eq!(view.wrap_count(), 1);

        view.layout(30, 5);
        assert_eq!(view.wrap_count(), 2);

        console.write_line("more", ScrollIntent::ToEnd);
        view.layout(30, 5);
        assert_eq!(view.wrap_count(), 3);
        assert_eq!(view.scroll().total(), 22);
    }

    #[test]
    fn test_dropping_view_unregisters_on_next_refresh() {
        let (console, _queue) = ConsoleController::new();
        let first = ConsoleView::new(&console, SETTLE);
        let second = ConsoleView::new(&console, SETTLE);
        assert_ne!(first.id(), second.id());
        assert_eq!(console.live_view_count(), 2);

        drop(second);
        console.blank_line(ScrollIntent::ToEnd);
        assert_eq!(console.live_view_count(), 1);
        assert_eq!(first.text(), "\n");
    }

    #[test]
    fn test_views_stay_in_sync_after_background_burst() {
        let (console, mut queue) = ConsoleController::new();
        let left = ConsoleView::new(&console, SETTLE);
        let right = ConsoleView::new(&console, SETTLE);

        let worker = console.clone();
        thread::spawn(move || {
            for i in 0..10 {
                worker.write_line(format!("bg {i}"), ScrollIntent::ToEnd);
            }
        })
        .join()
        .unwrap();

        assert_eq!(left.render_count(), 0);
        assert_eq!(queue.run_pending(), 1);
        assert_eq!(left.render_count(), 1);
        assert_eq!(right.render_count(), 1);
        assert_eq!(left.text(), right.text());
        assert_eq!(left.text().lines().count(), 10);
    }
}
