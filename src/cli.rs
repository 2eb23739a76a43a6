// CLI module - command-line argument parsing and handlers
//
// Top-level flags override config for a single run. Subcommands manage the
// config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print config file location

use crate::config::{Config, MAX_VIEWS, VERSION};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// mineconsole - append-only in-app console with live views
#[derive(Parser, Debug)]
#[command(name = "mineconsole")]
#[command(version = VERSION)]
#[command(about = "In-app console with multiple live views", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunOverrides,
}

/// Per-run overrides, applied on top of env/file config
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    /// Console views to open at startup
    #[arg(long)]
    pub views: Option<usize>,

    /// Background writer threads
    #[arg(long)]
    pub writers: Option<usize>,

    /// Delay between writes of one writer, in milliseconds
    #[arg(long = "interval-ms")]
    pub interval_ms: Option<u64>,

    /// Lines per writer (0 = until quit)
    #[arg(long)]
    pub lines: Option<usize>,

    /// Skip the TUI and print the console buffer when writers finish
    #[arg(long)]
    pub headless: bool,
}

impl RunOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(views) = self.views {
            config.views = views.clamp(1, MAX_VIEWS);
        }
        if let Some(writers) = self.writers {
            config.demo.writers = writers;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.demo.interval_ms = interval_ms;
        }
        if let Some(lines) = self.lines {
            config.demo.lines = lines;
        }
        if self.headless {
            config.enable_tui = false;
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should do after argument parsing
#[derive(Debug)]
pub enum CliAction {
    /// A subcommand ran; exit
    Handled,
    /// Start the console with these overrides
    Run(RunOverrides),
}

pub fn handle_cli() -> Result<CliAction> {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> Result<CliAction> {
    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: mineconsole config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(CliAction::Handled)
        }
        None => Ok(CliAction::Run(cli.run)),
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default().write_to(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_args_runs_with_no_overrides() {
        let cli = parse(&["mineconsole"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.run, RunOverrides::default());
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = parse(&[
            "mineconsole",
            "--views",
            "3",
            "--writers",
            "4",
            "--interval-ms",
            "10",
            "--lines",
            "7",
            "--headless",
        ]);
        assert_eq!(cli.run.views, Some(3));
        assert_eq!(cli.run.writers, Some(4));
        assert_eq!(cli.run.interval_ms, Some(10));
        assert_eq!(cli.run.lines, Some(7));
        assert!(cli.run.headless);
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let mut config = Config::default();
        let overrides = RunOverrides {
            views: Some(100),
            writers: Some(1),
            headless: true,
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.views, MAX_VIEWS);
        assert_eq!(config.demo.writers, 1);
        assert_eq!(config.demo.interval_ms, 250);
        assert!(!config.enable_tui);
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = parse(&["mineconsole", "config", "--path"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                show: false,
                reset: false,
                path: true
            })
        );
    }

    #[test]
    fn test_dispatch_run() {
        let cli = parse(&["mineconsole", "--writers", "2"]);
        match dispatch(cli).unwrap() {
            CliAction::Run(overrides) => assert_eq!(overrides.writers, Some(2)),
            CliAction::Handled => panic!("expected run"),
        }
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["mineconsole", "--bogus"]).is_err());
    }
}
