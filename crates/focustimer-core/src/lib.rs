//! # focustimer Core Library
//!
//! Business logic for a focus-interval timer: alternating work and break
//! periods, with every finished interval recorded into a history ledger.
//! The `focustimer` CLI is a thin front end over this crate; any other host
//! (a desktop shell, a tray app) drives the same [`FocusTimer`].
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second
//! - **Completion Coordinator**: records finished intervals and schedules the
//!   cancelable switch to the next mode
//! - **Focus History Ledger**: completed intervals, session groups, totals
//! - **Storage**: key-value persistence (SQLite or in-memory) and TOML config
//!
//! The engine and the ledger never call each other; [`FocusTimer`] owns both
//! and routes completions through the coordinator.

pub mod app;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod history;
pub mod host;
pub mod settings;
pub mod storage;
pub mod timer;

pub use app::FocusTimer;
pub use coordinator::{CompletionCoordinator, TransitionKind};
pub use error::{ConfigError, CoreError, StoreError, TimerError, ValidationError};
pub use events::Event;
pub use history::{FocusLedger, FocusRecord, GroupedView, SessionGroup, Stats};
pub use host::{HostWindow, NullHost, ProgressReport};
pub use settings::Settings;
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use timer::{Clock, ManualClock, SystemClock, TimerEngine, TimerMode, TimerPhase, TimerState};
