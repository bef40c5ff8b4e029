use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::RecordType;
use crate::timer::{TimerMode, TimerPhase};

/// Every state change in the system produces an Event.
/// Hosts render from them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero by ticking.
    TimerCompleted {
        mode: TimerMode,
        completion_seq: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time replaced by a direct edit, preset, or drag.
    TimeSet {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    BreakStarted {
        session_count: u32,
        duration_min: u32,
        long_break: bool,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    WorkStarted {
        duration_min: u32,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    RecordAdded {
        id: i64,
        record_type: RecordType,
        duration_min: u64,
        session_group: u32,
        at: DateTime<Utc>,
    },
    RecordDeleted {
        id: i64,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        at: DateTime<Utc>,
    },
    SettingsChanged {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        mode: TimerMode,
        remaining_secs: u64,
        total_secs: u64,
        session_count: u32,
        at: DateTime<Utc>,
    },
}
