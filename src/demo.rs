// Demo writers: background threads that feed the console
//
// Each writer appends numbered, colour-tagged lines at the tail. Every tenth
// line a writer also drops a checkpoint at the head, so both scroll intents
// show up in the views. None of these writes happen on the UI thread, so they
// all go through the coalesced refresh path.
//
// Run with: mineconsole --writers 4 --interval-ms 50

use crate::config::DemoConfig;
use crate::console::{ConsoleController, Fragment, ScrollIntent};
use ratatui::style::{Color, Modifier, Style};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Lines between two head checkpoints of one writer
const CHECKPOINT_EVERY: usize = 10;

const WRITER_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Blue,
    Color::Red,
];

fn writer_style(id: usize) -> Style {
    Style::default()
        .fg(WRITER_COLORS[id % WRITER_COLORS.len()])
        .add_modifier(Modifier::BOLD)
}

/// Fragments for line `n` of writer `id`
fn writer_line(id: usize, n: usize) -> [Fragment; 2] {
    [
        Fragment::styled(format!("[w{id}] "), writer_style(id)),
        Fragment::plain(format!("line {n}")),
    ]
}

fn checkpoint_line(id: usize, n: usize) -> [Fragment; 2] {
    [
        Fragment::styled(
            "checkpoint ",
            Style::default().add_modifier(Modifier::REVERSED),
        ),
        Fragment::plain(format!("w{id} reached line {n}")),
    ]
}

/// Handles to the running writer threads
pub struct DemoWriters {
    shutdown: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl DemoWriters {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Ask every writer to stop after its current line
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for all writers to exit
    pub fn join(self) {
        for handle in self.handles {
            if handle.join().is_err() {
                tracing::warn!("Demo writer panicked");
            }
        }
    }
}

/// Start `config.writers` threads writing to `console`
///
/// With `config.lines == 0` writers run until `DemoWriters::stop`.
pub fn spawn_writers(console: &ConsoleController, config: &DemoConfig) -> DemoWriters {
    let shutdown = Arc::new(AtomicBool::new(false));
    let interval = config.interval();
    let limit = config.lines;

    let handles = (0..config.writers)
        .filter_map(|id| {
            let console = console.clone();
            let shutdown = shutdown.clone();
            let spawned = thread::Builder::new()
                .name(format!("demo-writer-{id}"))
                .spawn(move || run_writer(id, console, shutdown, interval, limit));
            match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::error!("Failed to spawn demo writer {}: {}", id, e);
                    None
                }
            }
        })
        .collect();

    DemoWriters { shutdown, handles }
}

fn run_writer(
    id: usize,
    console: ConsoleController,
    shutdown: Arc<AtomicBool>,
    interval: Duration,
    limit: usize,
) {
    tracing::debug!(writer = id, "demo writer started");
    let mut n = 0;
    while !shutdown.load(Ordering::Relaxed) && (limit == 0 || n < limit) {
        n += 1;
        console.write_line_parts(writer_line(id, n), ScrollIntent::ToEnd);
        if n % CHECKPOINT_EVERY == 0 {
            console.write_line_parts(checkpoint_line(id, n), ScrollIntent::ToStart);
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    tracing::debug!(writer = id, lines = n, "demo writer finished");
}

/// Emit a periodic log line until shutdown; with the console log layer
/// installed these show up in every view
pub async fn run_heartbeat(interval: Duration, mut shutdown_rx: oneshot::Receiver<()>) {
    let mut beats: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::debug!("Heartbeat received shutdown signal");
                return;
            }
            _ = sleep(interval) => {
                beats += 1;
                tracing::info!("heartbeat {}", beats);
            }
        }
    }
}
