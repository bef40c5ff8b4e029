use clap::Subcommand;
use focustimer_core::{Config, SessionGroup};

use super::{open_timer, print_json, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed intervals, most recent first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show intervals grouped by session, as JSON
    Groups,
    /// Show totals, as JSON
    Stats,
    /// Delete one record by id
    Delete {
        /// Record id
        id: i64,
    },
    /// Delete all records and reset the session count
    Clear,
}

pub fn run(action: HistoryAction, config: &Config) -> CliResult {
    let mut timer = open_timer(config)?;

    match action {
        HistoryAction::List { json } => {
            if json {
                print_json(timer.history())?;
            } else if timer.history().is_empty() {
                println!("no focus history");
            } else {
                for record in timer.history() {
                    println!(
                        "{}  {}  {:<5}  {:>3} min  group {}",
                        record.id,
                        record.start_time.format("%Y-%m-%d %H:%M"),
                        if record.is_work() { "work" } else { "break" },
                        record.duration,
                        record.session_group,
                    );
                }
                println!("total focus: {} min", timer.total_focus_time());
            }
        }
        HistoryAction::Groups => {
            let groups: Vec<SessionGroup> = timer.grouped_view().iter().collect();
            print_json(&groups)?;
        }
        HistoryAction::Stats => print_json(&timer.stats())?,
        HistoryAction::Delete { id } => match timer.delete_record(id) {
            Some(event) => print_json(&event)?,
            None => return Err(format!("no record with id {id}").into()),
        },
        HistoryAction::Clear => print_json(&timer.clear_history())?,
    }
    Ok(())
}
