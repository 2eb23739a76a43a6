//! Console controller - the single point of mutation and fan-out
//!
//! Every write goes through `mutate`: the buffer is changed synchronously on
//! the calling thread, then a refresh is requested with the caller's intent.
//!
//! # Refresh marshalling
//!
//! The controller is bound to the thread that constructed it (the UI thread).
//! Requests made on that thread refresh immediately. Requests from any other
//! thread go through a single pending slot:
//!
//! ```text
//!   worker ──write──▶ buffer (locked)
//!          ──request──▶ pending slot empty? ──yes──▶ store intent + send RefreshRequest
//!                                           ──no───▶ overwrite intent, send nothing
//!
//!   UI thread ──RefreshRequest──▶ take slot (clears it) ──▶ refresh pass
//! ```
//!
//! At most one `RefreshRequest` is ever in flight, so a burst of background
//! writes costs one refresh pass, not one per write.

use super::buffer::{LineBuffer, Rendered};
use super::fragment::Fragment;
use super::registry::{ConsoleSurface, ViewId, ViewRegistry};
use super::{lock, ScrollIntent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, ThreadId};
use tokio::sync::mpsc;

/// Token telling the UI thread a refresh is pending
///
/// Only the controller creates these; the UI loop hands them back through
/// [`ConsoleController::process`].
#[derive(Debug)]
pub struct RefreshRequest(());

/// Receiving half of the refresh channel, owned by the UI loop
///
/// Drain it on the thread that created the controller: refresh passes must
/// run on the UI thread.
pub struct RefreshQueue {
    rx: mpsc::UnboundedReceiver<RefreshRequest>,
    controller: ConsoleController,
}

impl RefreshQueue {
    /// Wait for the next refresh request
    ///
    /// The queue keeps its own controller handle, so the channel stays open
    /// for as long as the queue lives.
    pub async fn recv(&mut self) -> Option<RefreshRequest> {
        self.rx.recv().await
    }

    /// Run every refresh request queued so far without waiting.
    /// Returns the number of refresh passes executed.
    pub fn run_pending(&mut self) -> usize {
        let mut passes = 0;
        while let Ok(request) = self.rx.try_recv() {
            if self.controller.process(request) {
                passes += 1;
            }
        }
        passes
    }
}

struct Inner {
    buffer: Mutex<LineBuffer>,
    registry: Mutex<ViewRegistry>,
    /// Single-slot pending refresh (`Some` while a request is in flight)
    pending: Mutex<Option<ScrollIntent>>,
    refreshing: AtomicBool,
    ui_thread: ThreadId,
    refresh_tx: mpsc::UnboundedSender<RefreshRequest>,
}

/// Cloneable handle to one console: buffer, view registry, refresh channel
#[derive(Clone)]
pub struct ConsoleController {
    inner: Arc<Inner>,
}

impl ConsoleController {
    /// Unbounded console bound to the current thread as its UI thread
    pub fn new() -> (Self, RefreshQueue) {
        Self::with_max_fragments(0)
    }

    /// Console holding at most `max_fragments` fragments (0 = unbounded),
    /// bound to the current thread as its UI thread
    pub fn with_max_fragments(max_fragments: usize) -> (Self, RefreshQueue) {
        let (refresh_tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            inner: Arc::new(Inner {
                buffer: Mutex::new(LineBuffer::with_limit(max_fragments)),
                registry: Mutex::new(ViewRegistry::default()),
                pending: Mutex::new(None),
                refreshing: AtomicBool::new(false),
                ui_thread: thread::current().id(),
                refresh_tx,
            }),
        };
        let queue = RefreshQueue {
            rx,
            controller: controller.clone(),
        };
        (controller, queue)
    }

    /// Write `content` without a line break, at the head for
    /// `ScrollIntent::ToStart` and at the tail otherwise
    pub fn write(&self, content: impl Into<Fragment>, intent: ScrollIntent) {
        let fragment = content.into();
        self.mutate(intent, |buffer| match intent {
            ScrollIntent::ToStart => {
                buffer.prepend(fragment);
            }
            ScrollIntent::ToEnd => {
                buffer.append(fragment);
            }
        });
    }

    /// Write `content` followed by a line break on the written side
    pub fn write_line(&self, content: impl Into<Fragment>, intent: ScrollIntent) {
        self.write_line_parts([content.into()], intent);
    }

    /// Write several fragments as one line, under a single buffer lock
    ///
    /// At the head the parts keep their order and the line break lands in
    /// front of them, mirroring what `write_line` does for one fragment. The
    /// parts and the break count as one write for capacity eviction.
    pub fn write_line_parts(
        &self,
        parts: impl IntoIterator<Item = Fragment>,
        intent: ScrollIntent,
    ) {
        let parts: Vec<Fragment> = parts.into_iter().collect();
        self.mutate(intent, |buffer| match intent {
            ScrollIntent::ToStart => {
                buffer.prepend_all(std::iter::once(Fragment::line_break()).chain(parts));
            }
            ScrollIntent::ToEnd => {
                let line = parts.into_iter().chain(std::iter::once(Fragment::line_break()));
                buffer.append_all(line);
            }
        });
    }

    /// Write only a line break
    pub fn blank_line(&self, intent: ScrollIntent) {
        self.write(Fragment::line_break(), intent);
    }

    pub fn clear(&self, intent: ScrollIntent) {
        self.mutate(intent, LineBuffer::clear);
    }

    /// Register a view; the registry keeps only a weak handle
    pub fn register<S>(&self, surface: &Arc<S>) -> ViewId
    where
        S: ConsoleSurface + 'static,
    {
        let weak = Arc::downgrade(surface);
        let weak: Weak<dyn ConsoleSurface> = weak;
        let id = lock(&self.inner.registry).register(weak);
        tracing::debug!(view = %id, "console view registered");
        id
    }

    /// Registered views not yet pruned by a refresh pass
    pub fn live_view_count(&self) -> usize {
        lock(&self.inner.registry).len()
    }

    /// Snapshot of the current buffer
    pub fn render(&self) -> Rendered {
        lock(&self.inner.buffer).render()
    }

    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.inner.ui_thread
    }

    /// Run the refresh a queued request stands for.
    ///
    /// Clears the pending slot before refreshing, so writes racing with the
    /// pass queue a fresh request. Returns `false` if the slot was already
    /// empty (nothing to do).
    pub fn process(&self, _request: RefreshRequest) -> bool {
        debug_assert!(
            self.is_ui_thread(),
            "console refresh requests must be processed on the UI thread"
        );
        let intent = lock(&self.inner.pending).take();
        match intent {
            Some(intent) => {
                self.refresh(intent);
                true
            }
            None => false,
        }
    }

    fn mutate(&self, intent: ScrollIntent, apply: impl FnOnce(&mut LineBuffer)) {
        {
            let mut buffer = lock(&self.inner.buffer);
            apply(&mut buffer);
        }
        self.request_refresh(intent);
    }

    fn request_refresh(&self, intent: ScrollIntent) {
        if self.is_ui_thread() && !self.inner.refreshing.load(Ordering::Acquire) {
            self.refresh(intent);
            return;
        }

        let mut pending = lock(&self.inner.pending);
        if pending.replace(intent).is_some() {
            tracing::trace!(?intent, "refresh already queued, coalesced");
            return;
        }
        if self.inner.refresh_tx.send(RefreshRequest(())).is_err() {
            tracing::trace!("refresh queue closed, no views will update");
        }
    }

    /// One pass over the registry on the UI thread
    fn refresh(&self, intent: ScrollIntent) {
        let Some(_pass) = RefreshPass::enter(&self.inner.refreshing) else {
            return;
        };

        let (surfaces, pruned) = lock(&self.inner.registry).live_surfaces();
        let rendered = self.render();
        for surface in &surfaces {
            surface.render_and_scroll(&rendered, intent);
        }

        if !pruned.is_empty() {
            tracing::debug!(
                pruned = pruned.len(),
                live = surfaces.len(),
                "dropped console views pruned"
            );
        }
    }
}

/// Marks a refresh pass in progress; writes made during the pass are queued
/// instead of recursing into another pass
struct RefreshPass<'a>(&'a AtomicBool);

impl<'a> RefreshPass<'a> {
    fn enter(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RefreshPass<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
