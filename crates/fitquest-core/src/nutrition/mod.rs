mod entry;
mod ledger;
mod progress;
mod targets;
mod totals;

pub use entry::{Entry, EntryInput};
pub use ledger::DailyLedger;
pub use progress::{CalorieProgress, DailyProgress, MacroProgress};
pub use targets::{Targets, TrackingFlags};
pub use totals::DailyTotals;
