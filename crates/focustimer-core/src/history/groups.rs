use chrono::{DateTime, Utc};
use serde::Serialize;
use std::iter::Peekable;
use std::slice;

use super::record::FocusRecord;

/// Records sharing a session group id, with their totals. Derived on every
/// read and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGroup {
    pub id: u32,
    /// Most recent first.
    pub records: Vec<FocusRecord>,
    /// Minutes.
    pub total_work_time: u64,
    /// Minutes.
    pub total_break_time: u64,
    /// Number of work records in the group.
    pub session_count: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SessionGroup {
    fn open(record: &FocusRecord) -> Self {
        Self {
            id: record.session_group,
            records: Vec::new(),
            total_work_time: 0,
            total_break_time: 0,
            session_count: 0,
            start_time: record.start_time,
            end_time: record.end_time,
        }
    }

    fn push(&mut self, record: &FocusRecord) {
        self.start_time = self.start_time.min(record.start_time);
        self.end_time = self.end_time.max(record.end_time);
        if record.is_work() {
            self.total_work_time += record.duration;
            self.session_count += 1;
        } else {
            self.total_break_time += record.duration;
        }
        self.records.push(record.clone());
    }
}

/// Lazy grouping over a ledger's history, most recent group first.
///
/// Nothing is computed until iterated, and every call to [`GroupedView::iter`]
/// starts over from the current history.
#[derive(Debug, Clone, Copy)]
pub struct GroupedView<'a> {
    records: &'a [FocusRecord],
}

impl<'a> GroupedView<'a> {
    /// `records` must be most recent first with group ids non-increasing,
    /// which the ledger maintains.
    pub(crate) fn new(records: &'a [FocusRecord]) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> Groups<'a> {
        Groups {
            records: self.records.iter().peekable(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for GroupedView<'a> {
    type Item = SessionGroup;
    type IntoIter = Groups<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &GroupedView<'a> {
    type Item = SessionGroup;
    type IntoIter = Groups<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`GroupedView::iter`].
#[derive(Debug, Clone)]
pub struct Groups<'a> {
    records: Peekable<slice::Iter<'a, FocusRecord>>,
}

impl Iterator for Groups<'_> {
    type Item = SessionGroup;

    fn next(&mut self) -> Option<SessionGroup> {
        let first = self.records.next()?;
        let mut group = SessionGroup::open(first);
        group.push(first);
        while let Some(record) = self.records.next_if(|r| r.session_group == group.id) {
            group.push(record);
        }
        Some(group)
    }
}
