//! Append-only log of completed intervals.
//!
//! Records are kept most recent first. Group ids never decrease over time,
//! so every session group occupies one contiguous run of the history and
//! [`GroupedView`] can stream groups without sorting.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::groups::GroupedView;
use super::record::{FocusRecord, RecordType};
use super::stats::Stats;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusLedger {
    records: Vec<FocusRecord>,
    /// Minutes of recorded work.
    total_focus_time: u64,
}

impl FocusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted values. Records are reordered by group id if a
    /// stored history was not in group order.
    pub fn from_parts(mut records: Vec<FocusRecord>, total_focus_time: u64) -> Self {
        let ordered = records
            .windows(2)
            .all(|w| w[0].session_group >= w[1].session_group);
        if !ordered {
            records.sort_by(|a, b| b.session_group.cmp(&a.session_group));
        }
        Self {
            records,
            total_focus_time,
        }
    }

    /// Most recent first.
    pub fn records(&self) -> &[FocusRecord] {
        &self.records
    }

    pub fn total_focus_time(&self) -> u64 {
        self.total_focus_time
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Record a finished interval of `duration_secs` ending at `now`.
    ///
    /// The stored duration is rounded down to whole minutes. Without a start
    /// time the interval is assumed to have run right up to `now`.
    pub fn append(
        &mut self,
        record_type: RecordType,
        duration_secs: u64,
        start_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> &FocusRecord {
        let secs = i64::try_from(duration_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        let start_time = start_time
            .or_else(|| now.checked_sub_signed(Duration::seconds(secs)))
            .unwrap_or(now);
        let duration = duration_secs / 60;
        let record = FocusRecord {
            id: self.next_id(now),
            date: now.date_naive(),
            start_time,
            end_time: now,
            duration,
            record_type,
            session_group: self.next_group(record_type),
        };
        if record.is_work() {
            self.total_focus_time += duration;
        }
        tracing::debug!(id = record.id, group = record.session_group, duration, "recorded interval");
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Remove a record. Deleting work gives its minutes back, never going
    /// below zero.
    pub fn delete(&mut self, id: i64) -> Option<FocusRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let record = self.records.remove(index);
        if record.is_work() {
            self.total_focus_time = self.total_focus_time.saturating_sub(record.duration);
        }
        Some(record)
    }

    pub fn clear_all(&mut self) {
        self.records.clear();
        self.total_focus_time = 0;
    }

    pub fn grouped_view(&self) -> GroupedView<'_> {
        GroupedView::new(&self.records)
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        Stats::collect(&self.records, today)
    }

    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.records.iter().map(|r| r.id).max() {
            Some(last) if last >= candidate => last + 1,
            _ => candidate,
        }
    }

    /// Work right after work opens a new group; anything else joins the
    /// group of the most recent record.
    fn next_group(&self, record_type: RecordType) -> u32 {
        match self.records.first() {
            None => 1,
            Some(last) if record_type == RecordType::Work && last.is_work() => {
                last.session_group + 1
            }
            Some(last) => last.session_group,
        }
    }
}
