use clap::{Parser, Subcommand};
use focustimer_core::Config;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

mod commands;

#[derive(Parser)]
#[command(name = "focustimer", version, about = "Focus interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Focus history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Timer settings (durations, auto-start)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Install the subscriber before anything logs. `FOCUSTIMER_LOG` wins when
/// set; otherwise the returned handle swaps in the config file's filter.
fn init_tracing() -> Option<reload::Handle<EnvFilter, Registry>> {
    let from_env = EnvFilter::try_from_env("FOCUSTIMER_LOG").ok();
    let pinned = from_env.is_some();
    let (filter, handle) = reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("warn")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
    (!pinned).then_some(handle)
}

fn apply_log_filter(handle: &reload::Handle<EnvFilter, Registry>, directives: &str) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!(error = %e, "failed to apply log_filter");
            }
        }
        Err(e) => tracing::warn!(error = %e, log_filter = directives, "invalid log_filter"),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_handle = init_tracing();
    let config = Config::load_or_default();
    if let Some(handle) = &log_handle {
        apply_log_filter(handle, &config.log_filter);
    }

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::History { action } => commands::history::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
