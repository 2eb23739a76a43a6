//! View registry - weakly held console surfaces
//!
//! The registry never owns a view. Each entry is a `Weak` handle to the view's
//! shared state; when the owning view is dropped the handle stops upgrading and
//! the entry is removed on the next refresh pass.

use super::buffer::Rendered;
use super::ScrollIntent;
use std::fmt;
use std::sync::{Arc, Weak};

/// Something a refresh pass can push a rendered snapshot into
///
/// Implementations must not write to the console from inside
/// `render_and_scroll`; a refresh never schedules another refresh.
pub trait ConsoleSurface: Send + Sync {
    /// Replace the displayed text with `rendered` and apply `intent`
    fn render_and_scroll(&self, rendered: &Rendered, intent: ScrollIntent);
}

/// Registration handle, unique per controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entry {
    id: ViewId,
    surface: Weak<dyn ConsoleSurface>,
}

#[derive(Default)]
pub(crate) struct ViewRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ViewRegistry {
    pub(crate) fn register(&mut self, surface: Weak<dyn ConsoleSurface>) -> ViewId {
        self.next_id += 1;
        let id = ViewId(self.next_id);
        self.entries.push(Entry { id, surface });
        id
    }

    /// Registered entries, including dead ones not yet pruned
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop dead entries and return strong handles to the live ones, in
    /// registration order. Returns the pruned ids alongside.
    pub(crate) fn live_surfaces(&mut self) -> (Vec<Arc<dyn ConsoleSurface>>, Vec<ViewId>) {
        let mut live = Vec::with_capacity(self.entries.len());
        let mut pruned = Vec::new();

        self.entries.retain(|entry| match entry.surface.upgrade() {
            Some(surface) => {
                live.push(surface);
                true
            }
            None => {
                pruned.push(entry.id);
                false
            }
        });

        (live, pruned)
    }
}
