use std::time::Duration;

use clap::Subcommand;
use focustimer_core::timer::parse_minutes;
use focustimer_core::{Config, Event, FocusTimer};
use tokio::time::MissedTickBehavior;

use super::{open_timer, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown and run it in the foreground
    Start,
    /// Start the break for a finished work interval and run it in the foreground
    Break,
    /// Reset to an idle work interval
    Reset,
    /// Set the remaining time (0-60 minutes) and return to idle work
    Edit {
        /// Minutes
        minutes: String,
    },
    /// Change the remaining time without changing mode
    Adjust {
        /// Minutes
        minutes: String,
    },
    /// Pick a quick duration (1-60 minutes); also becomes the work duration
    Preset {
        /// Minutes
        minutes: String,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction, config: &Config) -> CliResult {
    let mut timer = open_timer(config)?;

    match action {
        TimerAction::Start => {
            print_json(&timer.start()?)?;
            run_foreground(&mut timer)?;
        }
        TimerAction::Break => {
            print_json(&timer.start_break()?)?;
            run_foreground(&mut timer)?;
        }
        TimerAction::Reset => print_json(&timer.reset())?,
        TimerAction::Edit { minutes } => {
            let minutes = parse_minutes(&minutes)?;
            print_json(&timer.edit_time(minutes)?)?;
        }
        TimerAction::Adjust { minutes } => {
            let minutes = parse_minutes(&minutes)?;
            print_json(&timer.adjust_time(minutes)?)?;
        }
        TimerAction::Preset { minutes } => {
            let minutes = parse_minutes(&minutes)?;
            print_json(&timer.select_preset(minutes)?)?;
        }
        TimerAction::Status => {
            // Applies a mode switch left over from an interrupted run.
            for event in timer.tick() {
                print_json(&event)?;
            }
            print_json(&timer.snapshot())?;
        }
    }
    Ok(())
}

/// Drive the 1 Hz tick until the timer stops with nothing pending.
fn run_foreground(timer: &mut FocusTimer) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(timer))
}

async fn drive(timer: &mut FocusTimer) -> CliResult {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for event in timer.tick() {
                    emit(&event)?;
                }
                if !timer.state().is_running && !timer.has_pending_transition() {
                    break;
                }
            }
            signal = &mut ctrl_c => {
                signal?;
                if let Ok(event) = timer.pause() {
                    emit(&event)?;
                }
                break;
            }
        }
    }
    print_json(&timer.snapshot())
}

fn emit(event: &Event) -> CliResult {
    tracing::debug!(?event, "timer event");
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
