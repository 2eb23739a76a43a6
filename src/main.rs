// mineconsole - in-app console demo shell
//
// Opens one or more console views in the terminal and starts background
// writers that feed the shared console buffer. With --headless the writers
// run a fixed number of lines and the buffer is printed to stdout instead.

use anyhow::Result;
use mineconsole::cli::{self, CliAction};
use mineconsole::config::{Config, LogRotation, LoggingConfig};
use mineconsole::console::{self, ConsoleController};
use mineconsole::demo;
use mineconsole::logging::ConsoleLayer;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Lines per writer in headless mode when the config asks for "until quit"
const HEADLESS_DEFAULT_LINES: usize = 20;

/// Interval between heartbeat log lines in the TUI
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Non-blocking rolling file writer, or `None` when the log dir is unusable
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    // Create log directory if it doesn't exist
    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(file_appender))
}

/// Initialize tracing
///
/// In TUI mode log lines go into the console itself (stdout would garble the
/// display); headless they go to stderr so stdout stays clean for the buffer.
/// File logging (JSON) is added on top when enabled.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, console: &ConsoleController) -> Option<WorkerGuard> {
    let default_filter = format!("mineconsole={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console_layer = config
        .enable_tui
        .then(|| ConsoleLayer::new(console.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    let overrides = match cli::handle_cli()? {
        CliAction::Handled => return Ok(()),
        CliAction::Run(overrides) => overrides,
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    overrides.apply(&mut config);

    // Created here, so this thread is the console's UI thread. The TUI is
    // awaited directly below and never moves off it.
    let (console, queue) = ConsoleController::with_max_fragments(config.console.max_fragments);
    if console::global::install(console.clone()).is_err() {
        anyhow::bail!("Console already installed");
    }

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = init_tracing(&config, &console);

    if config.enable_tui {
        run_interactive(console, queue, &config).await;
    } else {
        run_headless(&console, &config);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_interactive(
    console: ConsoleController,
    queue: console::RefreshQueue,
    config: &Config,
) {
    console::global::write_line(format!("mineconsole v{}", mineconsole::config::VERSION));
    console::global::blank_line();

    let writers = demo::spawn_writers(&console, &config.demo);
    let (heartbeat_tx, heartbeat_rx) = oneshot::channel();
    let heartbeat = tokio::spawn(demo::run_heartbeat(HEARTBEAT_INTERVAL, heartbeat_rx));

    tracing::info!(
        "Starting TUI with {} views and {} writers",
        config.views,
        writers.len()
    );
    if let Err(e) = mineconsole::tui::run_tui(console, queue, config).await {
        tracing::error!("TUI error: {:?}", e);
        eprintln!("TUI error: {e:#}");
    }

    tracing::info!("Shutting down...");
    writers.stop();
    // If the send fails, the heartbeat has already stopped (which is fine)
    let _ = heartbeat_tx.send(());
    let _ = heartbeat.await;
    writers.join();
}

fn run_headless(console: &ConsoleController, config: &Config) {
    let mut demo_config = config.demo.clone();
    if demo_config.lines == 0 {
        demo_config.lines = HEADLESS_DEFAULT_LINES;
    }

    tracing::info!(
        "Running headless: {} writers x {} lines",
        demo_config.writers,
        demo_config.lines
    );
    demo::spawn_writers(console, &demo_config).join();

    print!("{}", console.render());
}
