use clap::Subcommand;
use focustimer_core::{Config, ConfigError, Settings};

use super::{open_timer, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting (e.g. "workDuration", "autoStartBreak")
    Get {
        /// Setting key
        key: String,
    },
    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction, config: &Config) -> CliResult {
    let mut timer = open_timer(config)?;

    match action {
        SettingsAction::Get { key } => match timer.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ConfigError::UnknownKey(key).into()),
        },
        SettingsAction::Set { key, value } => {
            timer.set_setting(&key, &value)?;
            println!("ok");
        }
        SettingsAction::List => print_json(timer.settings())?,
        SettingsAction::Reset => {
            timer.update_settings(Settings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
