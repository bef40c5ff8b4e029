//! Focus history: completed intervals, their session groups, and totals.

mod groups;
mod ledger;
mod record;
mod stats;

pub use groups::{GroupedView, Groups, SessionGroup};
pub use ledger::FocusLedger;
pub use record::{FocusRecord, RecordType};
pub use stats::Stats;
