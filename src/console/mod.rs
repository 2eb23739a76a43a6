//! Console core - line buffer, controller, view registry
//!
//! ```text
//!   any thread                         UI thread
//!   ──────────                         ─────────
//!   write / write_line / clear
//!        │
//!        ▼
//!   ConsoleController ──mutate──▶ LineBuffer
//!        │
//!        └──request refresh──▶ RefreshQueue ──▶ refresh pass
//!                                                   │
//!                                    ┌──────────────┼──────────────┐
//!                                    ▼              ▼              ▼
//!                                  view 1         view 2      (dropped: pruned)
//! ```
//!
//! The controller is an ordinary value created by the composition root.
//! [`global`] can hold one installed controller for code that has no handle.

mod buffer;
mod controller;
mod fragment;
pub mod global;
mod registry;

pub use buffer::{LineBuffer, Rendered, StyledRun};
pub use controller::{ConsoleController, RefreshQueue, RefreshRequest};
pub use fragment::{Fragment, LINE_BREAK, NULL_TEXT};
pub use registry::{ConsoleSurface, ViewId};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where a write lands and where views should scroll afterwards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollIntent {
    /// Write at the head, scroll views to the start
    ToStart,
    /// Write at the tail, scroll views to the end
    #[default]
    ToEnd,
}

impl ScrollIntent {
    /// `true` selects the head, matching the `at_head` flag callers pass around
    pub fn from_at_head(at_head: bool) -> Self {
        if at_head {
            Self::ToStart
        } else {
            Self::ToEnd
        }
    }

    pub fn is_start(self) -> bool {
        self == Self::ToStart
    }
}

/// Lock ignoring poisoning; console state stays usable after a writer panic
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_from_flag() {
        assert_eq!(ScrollIntent::from_at_head(true), ScrollIntent::ToStart);
        assert_eq!(ScrollIntent::from_at_head(false), ScrollIntent::ToEnd);
        assert_eq!(ScrollIntent::default(), ScrollIntent::ToEnd);
        assert!(ScrollIntent::ToStart.is_start());
    }
}
