//! End-to-end timer flows over the public API: ticking, completion,
//! recording, mode switches, and persistence.

use chrono::{DateTime, Duration, TimeZone, Utc};
use focustimer_core::{
    Database, Event, FocusTimer, ManualClock, MemoryStore, NullHost, Settings, TimerMode,
    TimerPhase,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 8, 30, 0).unwrap()
}

fn open(store: Box<dyn focustimer_core::KeyValueStore>, clock: &ManualClock) -> FocusTimer {
    FocusTimer::new(
        store,
        Box::new(NullHost),
        Box::new(clock.clone()),
        Duration::seconds(1),
    )
}

/// Advance one second per tick and collect every event.
fn run(timer: &mut FocusTimer, clock: &ManualClock, secs: u64) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..secs {
        clock.advance_secs(1);
        events.extend(timer.tick());
    }
    events
}

#[test]
fn default_work_interval_records_and_enters_break() {
    let clock = ManualClock::new(t0());
    let mut timer = open(Box::new(Database::open_memory().unwrap()), &clock);

    timer.start().unwrap();
    let events = run(&mut timer, &clock, 1501);

    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            Event::TimerCompleted { .. } => "completed",
            Event::RecordAdded { .. } => "recorded",
            Event::BreakStarted { .. } => "break",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["completed", "recorded", "break"]);

    let record = &timer.history()[0];
    assert_eq!(record.duration, 25);
    assert_eq!(record.start_time, t0());
    assert_eq!(record.end_time, t0() + Duration::seconds(1500));
    assert_eq!(timer.total_focus_time(), 25);

    let state = timer.state();
    assert_eq!(state.session_count, 1);
    assert_eq!(state.timer_mode, TimerMode::Break);
    assert_eq!(state.time_remaining, 300);
    assert_eq!(timer.phase(), TimerPhase::Idle);
}

#[test]
fn every_fourth_break_is_long() {
    let clock = ManualClock::new(t0());
    let mut timer = open(Box::new(MemoryStore::new()), &clock);
    let settings = Settings {
        auto_start_break: true,
        ..Settings::default()
    };
    timer.update_settings(settings).unwrap();

    let mut breaks = Vec::new();
    for _ in 0..4 {
        timer.start().unwrap();
        run(&mut timer, &clock, 1501);
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.state().timer_mode, TimerMode::Break);
        let remaining = timer.state().time_remaining;
        breaks.push(remaining);
        run(&mut timer, &clock, remaining + 1);
        assert_eq!(timer.state().timer_mode, TimerMode::Work);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    assert_eq!(breaks, vec![300, 300, 300, 900]);
    assert_eq!(timer.state().session_count, 4);
    assert_eq!(timer.history().len(), 8);
    assert_eq!(timer.total_focus_time(), 100);

    let stats = timer.stats();
    assert_eq!(stats.completed_work_sessions, 4);
    assert_eq!(stats.total_break_min, 30);
}

#[test]
fn edit_time_while_idle() {
    let clock = ManualClock::new(t0());
    let mut timer = open(Box::new(MemoryStore::new()), &clock);
    timer.edit_time(10).unwrap();
    let state = timer.state();
    assert_eq!(state.time_remaining, 600);
    assert_eq!(state.timer_mode, TimerMode::Work);
    assert!(!state.is_timer_complete);
    assert_eq!(timer.phase(), TimerPhase::Idle);

    timer.start().unwrap();
    run(&mut timer, &clock, 601);
    assert_eq!(timer.history()[0].duration, 10);
    assert_eq!(timer.state().timer_mode, TimerMode::Break);

    // Coming back from the break uses the edited length.
    timer.start().unwrap();
    run(&mut timer, &clock, 301);
    assert_eq!(timer.state().timer_mode, TimerMode::Work);
    assert_eq!(timer.state().time_remaining, 600);
}

#[test]
fn pause_and_resume_keep_remaining_time() {
    let clock = ManualClock::new(t0());
    let mut timer = open(Box::new(MemoryStore::new()), &clock);
    timer.start().unwrap();
    run(&mut timer, &clock, 100);
    timer.pause().unwrap();
    run(&mut timer, &clock, 50);
    assert_eq!(timer.state().time_remaining, 1400);
    timer.start().unwrap();
    assert_eq!(timer.state().time_remaining, 1400);
    assert_eq!(timer.phase(), TimerPhase::Running);
}

#[test]
fn consecutive_work_opens_new_group() {
    let clock = ManualClock::new(t0());
    let mut timer = open(Box::new(MemoryStore::new()), &clock);

    // Work, break, work stay together.
    timer.edit_time(1).unwrap();
    timer.start().unwrap();
    run(&mut timer, &clock, 61);
    timer.start().unwrap();
    run(&mut timer, &clock, 301);
    timer.edit_time(1).unwrap();
    timer.start().unwrap();
    run(&mut timer, &clock, 61);

    // Skipping the break: the next work record starts a new group.
    timer.edit_time(1).unwrap();
    timer.start().unwrap();
    run(&mut timer, &clock, 61);

    let groups: Vec<_> = timer.grouped_view().iter().collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].session_count, 1);
    assert_eq!(groups[1].session_count, 2);
    assert_eq!(groups[1].total_break_time, 5);
    assert_eq!(groups[1].records.len(), 3);
}

#[test]
fn history_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("focustimer.db");
    let clock = ManualClock::new(t0());

    {
        let mut timer = open(Box::new(Database::open_path(&path).unwrap()), &clock);
        timer.set_setting("shortBreakDuration", "7").unwrap();
        // Current durations are picked up from settings on reset.
        timer.reset();
        timer.edit_time(2).unwrap();
        timer.start().unwrap();
        run(&mut timer, &clock, 121);
        assert_eq!(timer.state().time_remaining, 420);
    }

    let timer = open(Box::new(Database::open_path(&path).unwrap()), &clock);
    assert_eq!(timer.settings().short_break_duration, 7);
    assert_eq!(timer.history().len(), 1);
    assert_eq!(timer.total_focus_time(), 2);
    assert_eq!(timer.state().session_count, 1);
    assert_eq!(timer.state().timer_mode, TimerMode::Break);
    assert_eq!(timer.state().time_remaining, 420);
}
