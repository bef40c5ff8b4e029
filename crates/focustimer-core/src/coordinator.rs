//! Completion coordinator.
//!
//! Reacts to the engine reaching zero: records the finished interval in the
//! ledger, then, after a short delay, moves the engine into the next mode.
//! The engine and the ledger never see each other; this module is the only
//! place that touches both.
//!
//! The delayed mode switch is a pending task keyed by the engine's
//! completion sequence number. Any command that supersedes the completion
//! cancels it, and a task whose key no longer matches is dropped when due.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::history::{FocusLedger, RecordType};
use crate::settings::Settings;
use crate::timer::{break_minutes, TimerEngine, TimerMode};

/// How long the completion state lingers before the mode switch.
pub const DEFAULT_COMPLETION_DELAY_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Work finished: count the session and enter its break.
    ToBreak,
    /// Break finished: return to work.
    ToWork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTransition {
    completion_seq: u64,
    due_at: DateTime<Utc>,
    kind: TransitionKind,
}

#[derive(Debug, Clone)]
pub struct CompletionCoordinator {
    delay: Duration,
    pending: Option<PendingTransition>,
}

impl Default for CompletionCoordinator {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_COMPLETION_DELAY_MS))
    }
}

impl CompletionCoordinator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The scheduled transition and when it is due, if any.
    pub fn pending(&self) -> Option<(TransitionKind, DateTime<Utc>)> {
        self.pending.map(|p| (p.kind, p.due_at))
    }

    /// Record an unclaimed completion and schedule the mode switch.
    ///
    /// Does nothing unless the engine is complete and has not recorded yet,
    /// so evaluating the same completion twice appends one record.
    pub fn evaluate(
        &mut self,
        engine: &mut TimerEngine,
        ledger: &mut FocusLedger,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        if !engine.mark_recorded() {
            return None;
        }

        let state = engine.state();
        let (record_type, fallback_min, kind) = match state.timer_mode {
            TimerMode::Work => (
                RecordType::Work,
                state.current_work_duration,
                TransitionKind::ToBreak,
            ),
            TimerMode::Break => (
                RecordType::Break,
                break_minutes(state.session_count, state.current_break_duration, settings),
                TransitionKind::ToWork,
            ),
        };
        let elapsed_secs = match state.session_start_time {
            Some(started) => u64::try_from((now - started).num_seconds()).unwrap_or(0),
            None => u64::from(fallback_min) * 60,
        };
        let completion_seq = state.completion_seq;
        let start_time = state.session_start_time;

        let record = ledger.append(record_type, elapsed_secs, start_time, now);
        let event = Event::RecordAdded {
            id: record.id,
            record_type,
            duration_min: record.duration,
            session_group: record.session_group,
            at: now,
        };

        self.pending = Some(PendingTransition {
            completion_seq,
            due_at: now + self.delay,
            kind,
        });
        tracing::debug!(?kind, completion_seq, "transition scheduled");
        Some(event)
    }

    /// Apply the scheduled transition once it is due.
    pub fn poll(
        &mut self,
        engine: &mut TimerEngine,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        let pending = self.pending?;
        if now < pending.due_at {
            return None;
        }
        self.pending = None;

        let current = engine.state().completion_seq == pending.completion_seq;
        if !current || !engine.awaiting_transition() {
            tracing::debug!(kind = ?pending.kind, "dropping stale transition");
            return None;
        }

        let event = match pending.kind {
            TransitionKind::ToBreak => engine.enter_break(settings, settings.auto_start_break, now),
            TransitionKind::ToWork => engine.enter_work(settings.auto_start_next, now),
        };
        Some(event)
    }

    /// Drop the scheduled transition. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            tracing::debug!("pending transition cancelled");
        }
        cancelled
    }

    /// After a restart: a completion that was recorded but never switched
    /// modes gets its transition scheduled to fire right away.
    pub fn recover(&mut self, engine: &TimerEngine, now: DateTime<Utc>) -> bool {
        if self.pending.is_some() || !engine.awaiting_transition() {
            return false;
        }
        let state = engine.state();
        let kind = match state.timer_mode {
            TimerMode::Work => TransitionKind::ToBreak,
            TimerMode::Break => TransitionKind::ToWork,
        };
        self.pending = Some(PendingTransition {
            completion_seq: state.completion_seq,
            due_at: now,
            kind,
        });
        true
    }
}
