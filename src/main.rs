//! Autoscroll - middle-click scrolling, settings and simulator

use anyhow::{Context, Result};
use autoscroll::paths;
use autoscroll::settings::editor::SettingsForm;
use autoscroll::settings::{JsonFileStore, ScrollMode, SettingsStore};
use autoscroll::simulate::{self, Scenario};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

/// Middle-click autoscroll settings and simulator
#[derive(Parser)]
#[command(name = "autoscroll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change stored settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Run a scripted gesture against an in-memory page
    Simulate {
        /// Horizontal pointer offset from the press, in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,
        /// Vertical pointer offset from the press, in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,
        /// Animation frames to run before pressing Escape
        #[arg(
            long,
            default_value_t = 60,
            value_parser = clap::value_parser!(u32).range(..=i64::from(simulate::MAX_FRAMES))
        )]
        frames: u32,
        /// Place a scroll container under the press
        #[arg(long)]
        scroller: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the resolved settings
    Show,
    /// Set the speed cap (1-500 pixels per frame)
    MaxSpeed { value: u32 },
    /// Set sensitivity on the 1-100 scale
    Sensitivity { value: u32 },
    /// Choose how gestures start and stop
    Mode { mode: ModeArg },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Click to start, click again to stop
    Toggle,
    /// Scroll only while the button is held
    Drag,
}

impl From<ModeArg> for ScrollMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Toggle => Self::Toggle,
            ModeArg::Drag => Self::Drag,
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let mut store = JsonFileStore::open(paths::settings_path());
    match cli.command {
        Commands::Settings { action } => {
            cmd_settings(&mut store, action.unwrap_or(SettingsAction::Show))
        }
        Commands::Simulate {
            dx,
            dy,
            frames,
            scroller,
        } => {
            let scenario = Scenario {
                dx,
                dy,
                frames,
                scroller,
            };
            let outcome = simulate::run(&scenario, store);
            if !outcome.engaged {
                println!("The press did not start a gesture.");
            }
            println!("{outcome}");
            Ok(())
        }
    }
}

/// Log to `<temp>/autoscroll.log` - tail with: tail -f /tmp/autoscroll.log
/// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    if debug_level == 0 {
        return;
    }

    let log_path = paths::log_path();
    // Start each run with an empty log
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let dir = log_path
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let file_appender = tracing_appender::rolling::never(dir, "autoscroll.log");
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}

fn cmd_settings<S: SettingsStore>(store: &mut S, action: SettingsAction) -> Result<()> {
    let mut form = SettingsForm::load(&*store);
    match action {
        SettingsAction::Show => {
            let settings = store.get().context("Failed to read settings")?;
            println!("Max speed:   {}", settings.max_scroll_speed);
            println!(
                "Sensitivity: {} ({} on the 1-100 scale)",
                settings.scroll_sensitivity, form.sensitivity
            );
            println!("Mode:        {}", settings.scroll_mode);
            return Ok(());
        }
        SettingsAction::MaxSpeed { value } => form
            .set_max_speed(store, value)
            .context("Failed to update max speed")?,
        SettingsAction::Sensitivity { value } => form
            .set_sensitivity(store, value)
            .context("Failed to update sensitivity")?,
        SettingsAction::Mode { mode } => form
            .set_mode(store, mode.into())
            .context("Failed to update mode")?,
    }
    println!("Saved.");
    Ok(())
}
