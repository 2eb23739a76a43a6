// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Draining queued console refreshes on the UI thread
// - Rendering the console views

pub mod app;
pub mod clipboard;
pub mod console_view;
pub mod input;
pub mod interaction;
pub mod scroll;
pub mod toast;
pub mod ui;
pub mod wrap;

use crate::config::Config;
use crate::console::{ConsoleController, RefreshQueue};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Run the TUI
///
/// Must be awaited on the thread the controller was created on: that is the
/// UI thread refreshes are delivered on.
pub async fn run_tui(
    console: ConsoleController,
    mut queue: RefreshQueue,
    config: &Config,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(console, config.views, config.console.fling_settle());

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut queue, config.console.tick()).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on input, the redraw ticker, and the refresh queue at once and
/// redraws after whichever fires first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    queue: &mut RefreshQueue,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);
    let console = app.console().clone();

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    let action = match event::read() {
                        Ok(Event::Key(key)) => input::action_for_key(key),
                        Ok(Event::Mouse(mouse)) => input::action_for_mouse(mouse),
                        _ => None,
                    };
                    if let Some(action) = action {
                        app.apply(action, Instant::now());
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            // Coalesced refresh from a background writer
            Some(request) = queue.recv() => {
                console.process(request);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
