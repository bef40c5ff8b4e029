use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{FocusRecord, RecordType};

/// Totals over the focus history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_focus_min: u64,
    pub total_break_min: u64,
    pub completed_work_sessions: u64,
    pub today_sessions: u64,
    pub today_focus_min: u64,
}

impl Stats {
    pub(crate) fn collect<'a>(records: impl IntoIterator<Item = &'a FocusRecord>, today: NaiveDate) -> Self {
        let mut stats = Stats::default();
        for record in records {
            stats.total_sessions += 1;
            match record.record_type {
                RecordType::Work => {
                    stats.completed_work_sessions += 1;
                    stats.total_focus_min += record.duration;
                    if record.date == today {
                        stats.today_sessions += 1;
                        stats.today_focus_min += record.duration;
                    }
                }
                RecordType::Break => {
                    stats.total_break_min += record.duration;
                }
            }
        }
        stats
    }
}
