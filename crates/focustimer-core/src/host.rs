//! One-way progress notifications to the hosting window.

use serde::{Deserialize, Serialize};

/// Title shown while the timer is not counting down.
pub const IDLE_TITLE: &str = "Focus Timer";

/// What the host shows outside the main view (window title, dock progress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub time_remaining: u64,
    pub is_running: bool,
    /// Length of the current interval in seconds.
    pub total_time: u64,
}

impl ProgressReport {
    /// `MM:SS` while counting down, the idle title otherwise.
    pub fn title(&self) -> String {
        if self.is_running && self.time_remaining > 0 {
            format!(
                "{:02}:{:02}",
                self.time_remaining / 60,
                self.time_remaining % 60
            )
        } else {
            IDLE_TITLE.to_string()
        }
    }

    /// Elapsed share of the interval in `0.0..=1.0`; `None` when the host
    /// should hide its progress bar.
    pub fn fraction(&self) -> Option<f64> {
        if !self.is_running || self.time_remaining == 0 || self.total_time == 0 {
            return None;
        }
        let elapsed = self.total_time.saturating_sub(self.time_remaining);
        Some((elapsed as f64 / self.total_time as f64).clamp(0.0, 1.0))
    }
}

/// Host window collaborator. The core never reads anything back.
pub trait HostWindow {
    fn report_progress(&mut self, report: &ProgressReport);
}

/// Host that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostWindow for NullHost {
    fn report_progress(&mut self, _report: &ProgressReport) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_while_running() {
        let report = ProgressReport {
            time_remaining: 1499,
            is_running: true,
            total_time: 1500,
        };
        assert_eq!(report.title(), "24:59");
    }

    #[test]
    fn title_when_stopped() {
        let report = ProgressReport {
            time_remaining: 1500,
            is_running: false,
            total_time: 1500,
        };
        assert_eq!(report.title(), IDLE_TITLE);
        assert_eq!(report.fraction(), None);
    }

    #[test]
    fn fraction_counts_elapsed_share() {
        let report = ProgressReport {
            time_remaining: 75,
            is_running: true,
            total_time: 300,
        };
        assert_eq!(report.fraction(), Some(0.75));
    }
}
