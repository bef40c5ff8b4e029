pub mod config;
pub mod history;
pub mod settings;
pub mod timer;

use std::io::Write;

use chrono::Duration;
use focustimer_core::{Config, Database, FocusTimer, HostWindow, ProgressReport, SystemClock};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Shows the countdown on the terminal's status line (stderr).
struct TerminalHost {
    showing: bool,
}

impl HostWindow for TerminalHost {
    fn report_progress(&mut self, report: &ProgressReport) {
        let mut err = std::io::stderr().lock();
        if report.is_running {
            let percent = report.fraction().map_or(0.0, |f| f * 100.0);
            let _ = write!(err, "\r{} ({percent:.0}%)   ", report.title());
            self.showing = true;
        } else if self.showing {
            let _ = writeln!(err);
            self.showing = false;
        }
        let _ = err.flush();
    }
}

/// Open the store named in `config` and load the timer from it.
pub fn open_timer(config: &Config) -> Result<FocusTimer, Box<dyn std::error::Error>> {
    let db = Database::open(&config.database_file)?;
    let delay_ms = i64::try_from(config.completion_delay_ms).unwrap_or(i64::MAX);
    Ok(FocusTimer::new(
        Box::new(db),
        Box::new(TerminalHost { showing: false }),
        Box::new(SystemClock),
        Duration::milliseconds(delay_ms),
    ))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
