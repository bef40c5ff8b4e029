//! The single owner of timer state.
//!
//! [`FocusTimer`] holds the settings, the engine, the ledger and the
//! coordinator, and is the command/query surface for a presentation layer.
//! Every mutation is followed by a write to the key-value store and a
//! progress report to the host window. Store failures are logged and
//! otherwise ignored: in-memory state is authoritative.

use chrono::Duration;

use crate::coordinator::CompletionCoordinator;
use crate::error::{ConfigError, TimerError};
use crate::events::Event;
use crate::history::{FocusLedger, FocusRecord, GroupedView, Stats};
use crate::host::HostWindow;
use crate::settings::Settings;
use crate::storage::{keys, load_or, persist, try_load, KeyValueStore};
use crate::timer::{Clock, TimerEngine, TimerPhase, TimerState};

pub struct FocusTimer {
    store: Box<dyn KeyValueStore>,
    host: Box<dyn HostWindow>,
    clock: Box<dyn Clock>,
    settings: Settings,
    engine: TimerEngine,
    ledger: FocusLedger,
    coordinator: CompletionCoordinator,
}

impl FocusTimer {
    /// Load persisted state from `store`, falling back to defaults for
    /// anything missing.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        host: Box<dyn HostWindow>,
        clock: Box<dyn Clock>,
        completion_delay: Duration,
    ) -> Self {
        let settings = load_settings(store.as_ref());
        let engine = load_engine(store.as_ref(), &settings);
        let ledger = FocusLedger::from_parts(
            load_or(store.as_ref(), keys::FOCUS_HISTORY, Vec::new()),
            load_or(store.as_ref(), keys::TOTAL_FOCUS_TIME, 0),
        );
        let mut coordinator = CompletionCoordinator::new(completion_delay);
        if coordinator.recover(&engine, clock.now()) {
            tracing::info!("resuming an interrupted mode transition");
        }

        let mut timer = Self {
            store,
            host,
            clock,
            settings,
            engine,
            ledger,
            coordinator,
        };
        timer.report_progress();
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    pub fn phase(&self) -> TimerPhase {
        self.engine.phase()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Most recent first.
    pub fn history(&self) -> &[FocusRecord] {
        self.ledger.records()
    }

    pub fn grouped_view(&self) -> GroupedView<'_> {
        self.ledger.grouped_view()
    }

    pub fn total_focus_time(&self) -> u64 {
        self.ledger.total_focus_time()
    }

    pub fn stats(&self) -> Stats {
        self.ledger.stats(self.clock.now().date_naive())
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot(self.clock.now())
    }

    /// Whether a mode switch is scheduled.
    pub fn has_pending_transition(&self) -> bool {
        self.coordinator.pending().is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// # Errors
    /// See [`TimerEngine::start`].
    pub fn start(&mut self) -> Result<Event, TimerError> {
        let event = self.engine.start(self.clock.now())?;
        self.coordinator.cancel();
        self.after_timer_change();
        Ok(event)
    }

    /// # Errors
    /// See [`TimerEngine::pause`].
    pub fn pause(&mut self) -> Result<Event, TimerError> {
        let event = self.engine.pause(self.clock.now())?;
        self.after_timer_change();
        Ok(event)
    }

    pub fn reset(&mut self) -> Event {
        self.coordinator.cancel();
        let event = self.engine.reset(&self.settings, self.clock.now());
        self.after_timer_change();
        event
    }

    /// # Errors
    /// See [`TimerEngine::edit_time`].
    pub fn edit_time(&mut self, minutes: u32) -> Result<Event, TimerError> {
        let event = self.engine.edit_time(minutes, self.clock.now())?;
        self.coordinator.cancel();
        self.after_timer_change();
        Ok(event)
    }

    /// # Errors
    /// See [`TimerEngine::adjust_time`].
    pub fn adjust_time(&mut self, minutes: u32) -> Result<Event, TimerError> {
        let event = self.engine.adjust_time(minutes, self.clock.now())?;
        self.after_timer_change();
        Ok(event)
    }

    /// Quick-time selection; also makes `minutes` the configured work
    /// duration.
    ///
    /// # Errors
    /// See [`TimerEngine::select_preset`].
    pub fn select_preset(&mut self, minutes: u32) -> Result<Event, TimerError> {
        let event = self.engine.select_preset(minutes, self.clock.now())?;
        self.coordinator.cancel();
        self.settings.work_duration = minutes;
        self.persist_value(keys::SETTINGS, &self.settings);
        self.after_timer_change();
        Ok(event)
    }

    /// # Errors
    /// See [`TimerEngine::start_break`].
    pub fn start_break(&mut self) -> Result<Event, TimerError> {
        let now = self.clock.now();
        // A completion nobody has ticked past yet is still recorded.
        if self
            .coordinator
            .evaluate(&mut self.engine, &mut self.ledger, &self.settings, now)
            .is_some()
        {
            self.persist_history();
        }
        let event = self.engine.start_break(&self.settings, now)?;
        self.coordinator.cancel();
        self.after_timer_change();
        Ok(event)
    }

    /// One clock signal. Advances a running countdown, records a finished
    /// interval, and applies a due mode switch. Call once per second whether
    /// or not the timer is running.
    pub fn tick(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();
        let was_running = self.engine.state().is_running;

        events.extend(self.engine.tick(now));
        let record = self
            .coordinator
            .evaluate(&mut self.engine, &mut self.ledger, &self.settings, now);
        let recorded = record.is_some();
        events.extend(record);
        events.extend(self.coordinator.poll(&mut self.engine, &self.settings, now));

        if recorded {
            self.persist_history();
        }
        if !events.is_empty() {
            self.after_timer_change();
        } else if was_running {
            self.persist_value(keys::TIMER_STATE, self.engine.state());
            self.report_progress();
        }
        events
    }

    /// Replace all settings.
    ///
    /// # Errors
    /// Returns the validation failure; settings are left unchanged.
    pub fn update_settings(&mut self, settings: Settings) -> Result<Event, ConfigError> {
        settings.validate()?;
        let previous = std::mem::replace(&mut self.settings, settings);
        self.persist_value(keys::SETTINGS, &self.settings);
        if self.engine.apply_settings(&previous, &self.settings) {
            self.after_timer_change();
        }
        Ok(Event::SettingsChanged {
            at: self.clock.now(),
        })
    }

    /// Change one setting by key, e.g. `workDuration`.
    ///
    /// # Errors
    /// Unknown key, unparsable value, or a value that breaks validation.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<Event, ConfigError> {
        let updated = self.settings.with_value(key, value)?;
        self.update_settings(updated)
    }

    pub fn delete_record(&mut self, id: i64) -> Option<Event> {
        self.ledger.delete(id)?;
        self.persist_history();
        Some(Event::RecordDeleted {
            id,
            at: self.clock.now(),
        })
    }

    /// Empty the history and start counting sessions from zero.
    pub fn clear_history(&mut self) -> Event {
        self.ledger.clear_all();
        self.engine.clear_session_count();
        self.persist_history();
        self.after_timer_change();
        Event::HistoryCleared {
            at: self.clock.now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn after_timer_change(&mut self) {
        let state = self.engine.state();
        self.persist_value(keys::SESSION_COUNT, &state.session_count);
        self.persist_value(keys::CURRENT_WORK_DURATION, &state.current_work_duration);
        self.persist_value(keys::CURRENT_BREAK_DURATION, &state.current_break_duration);
        self.persist_value(keys::TIMER_STATE, state);
        self.report_progress();
    }

    fn persist_history(&self) {
        self.persist_value(keys::FOCUS_HISTORY, self.ledger.records());
        self.persist_value(keys::TOTAL_FOCUS_TIME, &self.ledger.total_focus_time());
    }

    fn persist_value<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = persist(self.store.as_ref(), key, value) {
            tracing::warn!(key, error = %e, "failed to persist");
        }
    }

    fn report_progress(&mut self) {
        let report = self.engine.progress();
        self.host.report_progress(&report);
    }
}

fn load_settings(store: &dyn KeyValueStore) -> Settings {
    let settings = load_or(store, keys::SETTINGS, Settings::default());
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "stored settings invalid, using defaults");
            Settings::default()
        }
    }
}

fn load_engine(store: &dyn KeyValueStore, settings: &Settings) -> TimerEngine {
    match try_load::<TimerState>(store, keys::TIMER_STATE) {
        Ok(Some(state)) => return TimerEngine::restore(state),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring stored timer state"),
    }
    TimerEngine::from_parts(
        load_or(store, keys::SESSION_COUNT, 0),
        load_or(store, keys::CURRENT_WORK_DURATION, settings.work_duration),
        load_or(store, keys::CURRENT_BREAK_DURATION, settings.short_break_duration),
    )
}
