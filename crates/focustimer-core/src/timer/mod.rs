mod clock;
mod engine;
mod mode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{parse_minutes, TimerEngine, TimerPhase, TimerState, MAX_EDIT_MINUTES};
pub use mode::{break_minutes, is_long_break, TimerMode};
