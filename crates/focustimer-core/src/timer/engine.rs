//! Timer engine implementation.
//!
//! The engine is a one-second countdown with no internal thread: the caller
//! invokes `tick()` once per second while the timer runs. Every command takes
//! the current instant so tests can drive time explicitly.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v
//!        Complete -> (coordinator) -> Idle | Running in the next mode
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&settings);
//! engine.start(now)?;
//! // Once per second:
//! engine.tick(now); // Returns Some(Event::TimerCompleted) on 1 -> 0
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mode::{break_minutes, is_long_break, TimerMode};
use crate::error::TimerError;
use crate::events::Event;
use crate::host::ProgressReport;
use crate::settings::Settings;

/// Largest value accepted by `edit_time`, `adjust_time` and presets.
pub const MAX_EDIT_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Countdown expired; waiting for the completion to be recorded and the
    /// next mode to be entered.
    Complete,
}

/// Countdown state. Persisted as a whole under the `timer-state` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Seconds left in the current interval.
    pub time_remaining: u64,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_timer_complete: bool,
    pub timer_mode: TimerMode,
    /// Completed work sessions since the last reset.
    pub session_count: u32,
    /// Set by every `start`, resumes included; `pause` leaves it alone.
    /// Elapsed time measured from it is approximate after a pause.
    pub session_start_time: Option<DateTime<Utc>>,
    /// The current completion has been handed to the ledger.
    pub has_recorded: bool,
    /// Work length in effect (minutes); may differ from settings.
    pub current_work_duration: u32,
    /// Short break length in effect (minutes); may differ from settings.
    pub current_break_duration: u32,
    /// Number of natural completions so far; identifies a completion event.
    #[serde(default)]
    pub completion_seq: u64,
    /// The remaining time was set by the user and should become the current
    /// duration once the interval is running.
    #[serde(default)]
    pub user_edited: bool,
}

impl TimerState {
    fn fresh(session_count: u32, work_min: u32, break_min: u32) -> Self {
        Self {
            time_remaining: minutes_to_secs(work_min),
            is_running: false,
            is_paused: false,
            is_timer_complete: false,
            timer_mode: TimerMode::Work,
            session_count,
            session_start_time: None,
            has_recorded: false,
            current_work_duration: work_min,
            current_break_duration: break_min,
            completion_seq: 0,
            user_edited: false,
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Create an idle engine in work mode with durations taken from settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: TimerState::fresh(0, settings.work_duration, settings.short_break_duration),
        }
    }

    /// Create an idle engine from the individually persisted counters.
    pub fn from_parts(session_count: u32, work_min: u32, break_min: u32) -> Self {
        Self {
            state: TimerState::fresh(session_count, work_min, break_min),
        }
    }

    /// Rebuild from a persisted snapshot.
    ///
    /// A snapshot taken while running comes back paused: whatever was
    /// ticking it is gone.
    pub fn restore(mut state: TimerState) -> Self {
        if state.is_running {
            state.is_running = false;
            state.is_paused = true;
        }
        Self { state }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        let s = &self.state;
        if s.is_running {
            TimerPhase::Running
        } else if s.is_paused {
            TimerPhase::Paused
        } else if s.is_timer_complete {
            TimerPhase::Complete
        } else {
            TimerPhase::Idle
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.state.timer_mode
    }

    pub fn time_remaining(&self) -> u64 {
        self.state.time_remaining
    }

    pub fn session_count(&self) -> u32 {
        self.state.session_count
    }

    /// Nominal length of the current interval in seconds.
    ///
    /// Never less than the time remaining, so a long break (which is not a
    /// tracked duration) still reports sane progress.
    pub fn total_secs(&self) -> u64 {
        let minutes = match self.state.timer_mode {
            TimerMode::Work => self.state.current_work_duration,
            TimerMode::Break => self.state.current_break_duration,
        };
        minutes_to_secs(minutes).max(self.state.time_remaining)
    }

    pub fn progress(&self) -> ProgressReport {
        ProgressReport {
            time_remaining: self.state.time_remaining,
            is_running: self.state.is_running,
            total_time: self.total_secs(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            mode: self.state.timer_mode,
            remaining_secs: self.state.time_remaining,
            total_secs: self.total_secs(),
            session_count: self.state.session_count,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the countdown.
    ///
    /// # Errors
    /// `InvalidOperation` when already running or when no time is left.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if self.state.is_running {
            return Err(TimerError::InvalidOperation("timer already running"));
        }
        if self.state.time_remaining == 0 {
            return Err(TimerError::InvalidOperation("no time remaining"));
        }
        self.begin_running(now);
        if self.state.user_edited {
            self.track_current_duration();
        }
        Ok(Event::TimerStarted {
            mode: self.state.timer_mode,
            remaining_secs: self.state.time_remaining,
            at: now,
        })
    }

    /// # Errors
    /// `InvalidOperation` unless running.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if !self.state.is_running {
            return Err(TimerError::InvalidOperation("timer not running"));
        }
        self.state.is_running = false;
        self.state.is_paused = true;
        Ok(Event::TimerPaused {
            remaining_secs: self.state.time_remaining,
            at: now,
        })
    }

    /// Back to an idle work interval with durations from settings.
    pub fn reset(&mut self, settings: &Settings, now: DateTime<Utc>) -> Event {
        let completion_seq = self.state.completion_seq;
        self.state = TimerState::fresh(0, settings.work_duration, settings.short_break_duration);
        // Keep the sequence monotonic so stale deferred transitions never match.
        self.state.completion_seq = completion_seq;
        tracing::debug!("timer reset");
        Event::TimerReset {
            remaining_secs: self.state.time_remaining,
            at: now,
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Event::TimerCompleted)` on the 1 -> 0 transition and
    /// `None` otherwise, including when not running.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.state.is_running || self.state.time_remaining == 0 {
            return None;
        }
        self.state.time_remaining -= 1;
        if self.state.time_remaining > 0 {
            return None;
        }
        self.state.is_running = false;
        self.state.is_timer_complete = true;
        self.state.completion_seq += 1;
        tracing::info!(mode = ?self.state.timer_mode, seq = self.state.completion_seq, "interval complete");
        Some(Event::TimerCompleted {
            mode: self.state.timer_mode,
            completion_seq: self.state.completion_seq,
            at: now,
        })
    }

    /// Replace the remaining time with `minutes` and return to an idle work
    /// interval. Settings are not touched.
    ///
    /// # Errors
    /// `InvalidOperation` while running, `OutOfRangeInput` above
    /// [`MAX_EDIT_MINUTES`].
    pub fn edit_time(&mut self, minutes: u32, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if self.state.is_running {
            return Err(TimerError::InvalidOperation("cannot edit time while running"));
        }
        check_range(minutes, 0)?;
        self.set_idle_work(minutes);
        Ok(self.time_set_event(now))
    }

    /// Quick-time selection: like [`Self::edit_time`], for a non-zero
    /// preset. The caller writes the new work duration to settings.
    ///
    /// # Errors
    /// `InvalidOperation` while running, `OutOfRangeInput` outside 1..=60.
    pub fn select_preset(&mut self, minutes: u32, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if self.state.is_running {
            return Err(TimerError::InvalidOperation("cannot select a preset while running"));
        }
        check_range(minutes, 1)?;
        self.set_idle_work(minutes);
        Ok(self.time_set_event(now))
    }

    /// Drag-to-set: change the remaining time without touching mode or
    /// flags. While paused, the adjusted length becomes the current duration
    /// right away.
    ///
    /// # Errors
    /// `InvalidOperation` while running, `OutOfRangeInput` above
    /// [`MAX_EDIT_MINUTES`].
    pub fn adjust_time(&mut self, minutes: u32, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if self.state.is_running {
            return Err(TimerError::InvalidOperation("cannot adjust time while running"));
        }
        if self.state.is_timer_complete {
            return Err(TimerError::InvalidOperation("cannot adjust a finished interval"));
        }
        check_range(minutes, 0)?;
        self.state.time_remaining = minutes_to_secs(minutes);
        if self.state.is_paused {
            self.track_current_duration();
        } else {
            self.state.user_edited = true;
        }
        Ok(self.time_set_event(now))
    }

    /// Begin the break for a finished work interval right away instead of
    /// waiting for the automatic switch.
    ///
    /// # Errors
    /// `InvalidOperation` unless a work interval has just completed.
    pub fn start_break(&mut self, settings: &Settings, now: DateTime<Utc>) -> Result<Event, TimerError> {
        if self.state.timer_mode != TimerMode::Work || !self.state.is_timer_complete {
            return Err(TimerError::InvalidOperation("no finished work interval to break from"));
        }
        Ok(self.enter_break(settings, true, now))
    }

    /// Follow a changed work duration while sitting idle in work mode.
    pub fn apply_settings(&mut self, previous: &Settings, settings: &Settings) -> bool {
        let s = &self.state;
        let idle_work =
            s.timer_mode == TimerMode::Work && !s.is_running && !s.is_paused && !s.is_timer_complete;
        if previous.work_duration == settings.work_duration || !idle_work {
            return false;
        }
        self.state.time_remaining = minutes_to_secs(settings.work_duration);
        self.state.user_edited = true;
        true
    }

    // ── Completion hooks ─────────────────────────────────────────────

    /// Claim the current completion. Returns false if it was already claimed
    /// or there is no completion.
    pub(crate) fn mark_recorded(&mut self) -> bool {
        if !self.state.is_timer_complete || self.state.has_recorded {
            return false;
        }
        self.state.has_recorded = true;
        true
    }

    /// Completion already claimed whose transition has not happened yet.
    pub(crate) fn awaiting_transition(&self) -> bool {
        self.state.is_timer_complete && self.state.has_recorded
    }

    /// Count the finished work session and switch to the break that follows.
    pub(crate) fn enter_break(&mut self, settings: &Settings, auto_start: bool, now: DateTime<Utc>) -> Event {
        self.state.session_count += 1;
        let count = self.state.session_count;
        let minutes = break_minutes(count, self.state.current_break_duration, settings);
        self.state.timer_mode = TimerMode::Break;
        self.state.time_remaining = minutes_to_secs(minutes);
        self.state.is_timer_complete = false;
        self.state.has_recorded = false;
        self.state.user_edited = false;
        if auto_start {
            self.begin_running(now);
        } else {
            self.go_idle();
        }
        tracing::info!(session_count = count, minutes, auto_start, "break");
        Event::BreakStarted {
            session_count: count,
            duration_min: minutes,
            long_break: is_long_break(count, settings),
            auto_started: auto_start,
            at: now,
        }
    }

    /// Switch back to a work interval of the current work duration.
    pub(crate) fn enter_work(&mut self, auto_start: bool, now: DateTime<Utc>) -> Event {
        let minutes = self.state.current_work_duration;
        self.state.timer_mode = TimerMode::Work;
        self.state.time_remaining = minutes_to_secs(minutes);
        self.state.is_timer_complete = false;
        self.state.has_recorded = false;
        self.state.user_edited = false;
        if auto_start {
            self.begin_running(now);
        } else {
            self.go_idle();
        }
        tracing::info!(minutes, auto_start, "work");
        Event::WorkStarted {
            duration_min: minutes,
            auto_started: auto_start,
            at: now,
        }
    }

    pub(crate) fn clear_session_count(&mut self) {
        self.state.session_count = 0;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_running(&mut self, now: DateTime<Utc>) {
        self.state.is_running = true;
        self.state.is_paused = false;
        self.state.is_timer_complete = false;
        self.state.session_start_time = Some(now);
        self.state.has_recorded = false;
    }

    fn go_idle(&mut self) {
        self.state.is_running = false;
        self.state.is_paused = false;
        self.state.session_start_time = None;
    }

    fn set_idle_work(&mut self, minutes: u32) {
        self.state.time_remaining = minutes_to_secs(minutes);
        self.state.is_running = false;
        self.state.is_paused = false;
        self.state.is_timer_complete = false;
        self.state.timer_mode = TimerMode::Work;
        self.state.has_recorded = false;
        self.state.user_edited = true;
    }

    /// Round the remaining time up to whole minutes and make it the current
    /// duration of the active mode.
    fn track_current_duration(&mut self) {
        if !(self.state.is_running || self.state.is_paused) {
            return;
        }
        let minutes = u32::try_from(self.state.time_remaining.div_ceil(60)).unwrap_or(u32::MAX);
        match self.state.timer_mode {
            TimerMode::Work => self.state.current_work_duration = minutes,
            TimerMode::Break => self.state.current_break_duration = minutes,
        }
        self.state.user_edited = false;
    }

    fn time_set_event(&self, now: DateTime<Utc>) -> Event {
        Event::TimeSet {
            mode: self.state.timer_mode,
            remaining_secs: self.state.time_remaining,
            at: now,
        }
    }
}

/// Parse user-typed minutes.
///
/// # Errors
/// `OutOfRangeInput` for anything that is not an integer in 0..=60.
pub fn parse_minutes(input: &str) -> Result<u32, TimerError> {
    let minutes = input.trim().parse::<u32>().map_err(|_| out_of_range(input, 0))?;
    check_range(minutes, 0)?;
    Ok(minutes)
}

fn check_range(minutes: u32, min: u32) -> Result<(), TimerError> {
    if (min..=MAX_EDIT_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(out_of_range(&minutes.to_string(), min))
    }
}

fn out_of_range(input: &str, min: u32) -> TimerError {
    TimerError::OutOfRangeInput {
        input: input.to_string(),
        min,
        max: MAX_EDIT_MINUTES,
    }
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes) * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn engine() -> TimerEngine {
        TimerEngine::new(&Settings::default())
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = engine();
        assert_eq!(engine.phase(), TimerPhase::Idle);

        assert!(engine.start(t0()).is_ok());
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(engine.state().session_start_time, Some(t0()));

        assert!(engine.pause(t0()).is_ok());
        assert_eq!(engine.phase(), TimerPhase::Paused);
        assert!(!engine.state().is_running);

        assert!(engine.start(t0()).is_ok());
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert!(!engine.state().is_paused);
    }

    #[test]
    fn start_rejected_while_running_or_at_zero() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        assert_eq!(
            engine.start(t0()),
            Err(TimerError::InvalidOperation("timer already running"))
        );

        let mut engine = self::engine();
        engine.edit_time(0, t0()).unwrap();
        let before = engine.clone();
        assert!(engine.start(t0()).is_err());
        assert_eq!(engine, before);
    }

    #[test]
    fn pause_requires_running() {
        let mut engine = engine();
        assert!(engine.pause(t0()).is_err());
        assert_eq!(engine.phase(), TimerPhase::Idle);
    }

    #[test]
    fn pause_then_start_keeps_remaining_time() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        for _ in 0..75 {
            engine.tick(t0());
        }
        engine.pause(t0()).unwrap();
        let remaining = engine.time_remaining();
        engine.start(t0()).unwrap();
        assert_eq!(engine.time_remaining(), remaining);
        assert_eq!(engine.state().current_work_duration, 25);
    }

    #[test]
    fn pause_does_not_freeze_session_start() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        engine.pause(t0() + Duration::seconds(10)).unwrap();
        assert_eq!(engine.state().session_start_time, Some(t0()));
    }

    #[test]
    fn tick_completes_exactly_once() {
        let mut engine = engine();
        engine.edit_time(1, t0()).unwrap();
        engine.start(t0()).unwrap();
        let completions: Vec<Event> = (0..100).filter_map(|_| engine.tick(t0())).collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(engine.time_remaining(), 0);
        assert_eq!(engine.phase(), TimerPhase::Complete);
        assert_eq!(engine.state().completion_seq, 1);
    }

    #[test]
    fn tick_is_noop_when_idle() {
        let mut engine = engine();
        assert!(engine.tick(t0()).is_none());
        assert_eq!(engine.time_remaining(), 1500);
    }

    #[test]
    fn reset_restores_settings() {
        let settings = Settings::default();
        let mut engine = engine();
        finish(&mut engine);
        engine.start_break(&settings, t0()).unwrap();
        engine.reset(&settings, t0());
        let s = engine.state();
        assert_eq!(s.timer_mode, TimerMode::Work);
        assert_eq!(s.session_count, 0);
        assert_eq!(s.time_remaining, 1500);
        assert!(!s.is_running && !s.is_paused && !s.is_timer_complete && !s.has_recorded);
    }

    #[test]
    fn edit_time_forces_idle_work() {
        let settings = Settings::default();
        let mut engine = engine();
        finish(&mut engine);
        engine.start_break(&settings, t0()).unwrap();
        engine.pause(t0()).unwrap();

        engine.edit_time(10, t0()).unwrap();
        let s = engine.state();
        assert_eq!(s.time_remaining, 600);
        assert_eq!(s.timer_mode, TimerMode::Work);
        assert!(!s.is_timer_complete && !s.is_paused && !s.is_running);
    }

    #[test]
    fn edit_time_validates_input() {
        let mut engine = engine();
        assert!(matches!(
            engine.edit_time(61, t0()),
            Err(TimerError::OutOfRangeInput { .. })
        ));
        engine.start(t0()).unwrap();
        assert!(matches!(
            engine.edit_time(10, t0()),
            Err(TimerError::InvalidOperation(_))
        ));
        assert_eq!(engine.time_remaining(), 1500);
    }

    #[test]
    fn parse_minutes_rejects_text_and_range() {
        assert_eq!(parse_minutes(" 45 "), Ok(45));
        assert!(parse_minutes("ten").is_err());
        assert!(parse_minutes("-1").is_err());
        assert!(parse_minutes("61").is_err());
    }

    #[test]
    fn edited_time_becomes_work_duration_on_start() {
        let mut engine = engine();
        engine.edit_time(10, t0()).unwrap();
        assert_eq!(engine.state().current_work_duration, 25);
        engine.start(t0()).unwrap();
        assert_eq!(engine.state().current_work_duration, 10);
    }

    #[test]
    fn adjust_while_paused_tracks_duration() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        engine.pause(t0()).unwrap();
        engine.adjust_time(40, t0()).unwrap();
        assert_eq!(engine.time_remaining(), 2400);
        assert_eq!(engine.state().current_work_duration, 40);
        assert_eq!(engine.phase(), TimerPhase::Paused);
    }

    #[test]
    fn ticking_does_not_shrink_tracked_duration() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        for _ in 0..600 {
            engine.tick(t0());
        }
        assert_eq!(engine.state().current_work_duration, 25);
    }

    fn finish(engine: &mut TimerEngine) {
        engine.start(t0()).unwrap();
        while engine.tick(t0()).is_none() {}
    }

    #[test]
    fn start_break_uses_long_break_rule() {
        let settings = Settings::default();
        let mut engine = engine();
        let mut lengths = Vec::new();
        for _ in 0..4 {
            engine.edit_time(1, t0()).unwrap();
            finish(&mut engine);
            engine.start_break(&settings, t0()).unwrap();
            assert_eq!(engine.phase(), TimerPhase::Running);
            lengths.push(engine.time_remaining());
            engine.pause(t0()).unwrap();
        }
        assert_eq!(lengths, vec![300, 300, 300, 900]);
        assert_eq!(engine.session_count(), 4);
        assert_eq!(engine.mode(), TimerMode::Break);
    }

    #[test]
    fn start_break_requires_finished_work() {
        let settings = Settings::default();
        let mut engine = engine();
        assert!(engine.start_break(&settings, t0()).is_err());
        engine.start(t0()).unwrap();
        assert!(engine.start_break(&settings, t0()).is_err());

        // Already on the break: a second call must not count the session again.
        let mut engine = self::engine();
        finish(&mut engine);
        engine.start_break(&settings, t0()).unwrap();
        engine.pause(t0()).unwrap();
        assert_eq!(
            engine.start_break(&settings, t0()),
            Err(TimerError::InvalidOperation("no finished work interval to break from"))
        );
        assert_eq!(engine.session_count(), 1);

        // A finished break does not lead into another break.
        finish(&mut engine);
        assert_eq!(engine.mode(), TimerMode::Break);
        assert!(engine.start_break(&settings, t0()).is_err());
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn adjust_rejected_once_complete() {
        let mut engine = engine();
        finish(&mut engine);
        let before = engine.state().clone();
        assert!(engine.adjust_time(10, t0()).is_err());
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.time_remaining(), 0);
        assert!(engine.state().is_timer_complete);
    }

    #[test]
    fn apply_settings_retimes_idle_work_only() {
        let old = Settings::default();
        let new = Settings {
            work_duration: 50,
            ..Settings::default()
        };
        let mut engine = engine();
        assert!(engine.apply_settings(&old, &new));
        assert_eq!(engine.time_remaining(), 3000);

        let mut running = self::engine();
        running.start(t0()).unwrap();
        assert!(!running.apply_settings(&old, &new));
        assert_eq!(running.time_remaining(), 1500);
    }

    #[test]
    fn restore_turns_running_into_paused() {
        let mut engine = engine();
        engine.start(t0()).unwrap();
        let restored = TimerEngine::restore(engine.state().clone());
        assert_eq!(restored.phase(), TimerPhase::Paused);
    }

    #[test]
    fn total_secs_covers_long_break() {
        let settings = Settings {
            long_break_interval: 2,
            ..Settings::default()
        };
        let mut engine = engine();
        finish(&mut engine);
        engine.start_break(&settings, t0()).unwrap();
        engine.pause(t0()).unwrap();
        engine.edit_time(1, t0()).unwrap();
        finish(&mut engine);
        engine.start_break(&settings, t0()).unwrap();
        assert_eq!(engine.time_remaining(), 900);
        assert_eq!(engine.total_secs(), 900);
    }

    proptest! {
        #[test]
        fn countdown_is_monotone_and_completes_once(minutes in 1u32..=60, ticks in 0usize..4000) {
            let mut engine = engine();
            engine.edit_time(minutes, t0()).unwrap();
            engine.start(t0()).unwrap();
            let mut previous = engine.time_remaining();
            let mut completions = 0;
            for _ in 0..ticks {
                let completed = engine.tick(t0()).is_some();
                let now = engine.time_remaining();
                prop_assert!(now <= previous);
                if completed {
                    completions += 1;
                    prop_assert_eq!(now, 0);
                }
                prop_assert_eq!(engine.state().is_timer_complete, completions == 1);
                previous = now;
            }
            prop_assert!(completions <= 1);
            prop_assert_eq!(completions == 1, ticks as u64 >= u64::from(minutes) * 60);
            prop_assert!(!(engine.state().is_running && engine.state().is_paused));
        }
    }
}
