use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Work,
    Break,
}

impl From<TimerMode> for RecordType {
    fn from(mode: TimerMode) -> Self {
        match mode {
            TimerMode::Work => RecordType::Work,
            TimerMode::Break => RecordType::Break,
        }
    }
}

/// One completed interval. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecord {
    /// Creation time in epoch milliseconds, bumped to stay unique.
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Whole minutes.
    pub duration: u64,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub session_group: u32,
}

impl FocusRecord {
    pub fn is_work(&self) -> bool {
        self.record_type == RecordType::Work
    }
}
