use serde::{Deserialize, Serialize};

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Break,
}

/// Whether the break after `session_count` completed work sessions is long.
pub fn is_long_break(session_count: u32, settings: &Settings) -> bool {
    session_count.checked_rem(settings.long_break_interval) == Some(0)
}

/// Break length in minutes after `session_count` completed work sessions.
///
/// Short breaks use the currently tracked break duration, which may differ
/// from the configured one after a drag adjustment.
pub fn break_minutes(session_count: u32, current_break_duration: u32, settings: &Settings) -> u32 {
    if is_long_break(session_count, settings) {
        settings.long_break_duration
    } else {
        current_break_duration
    }
}
