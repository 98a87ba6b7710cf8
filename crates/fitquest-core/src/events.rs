use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::nutrition::{DailyTotals, Entry, Targets};

/// Every state change the shell may want to react to produces an Event.
/// The shell drains them after each call into the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// First activation ever recorded.
    StreakStarted {
        at: DateTime<Utc>,
    },
    /// Activation on the calendar day after the last one.
    StreakAdvanced {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
    /// Activation after a missed day.
    StreakReset {
        from: u32,
        at: DateTime<Utc>,
    },
    /// The ledger was emptied for a new day.
    DayCleared {
        entries_cleared: usize,
        at: DateTime<Utc>,
    },
    EntryAdded {
        entry: Entry,
        totals: DailyTotals,
    },
    EntryEdited {
        entry: Entry,
        totals: DailyTotals,
    },
    EntryDeleted {
        id: String,
        totals: DailyTotals,
    },
    /// Calorie total crossed the target on this add.
    /// `alert_ms` is the haptic/alert length the shell should play; 0 means silent.
    GoalReached {
        calories: u32,
        target: u32,
        alert_ms: u64,
        at: DateTime<Utc>,
    },
    TargetsSaved {
        targets: Targets,
    },
}

impl Event {
    pub fn is_goal_reached(&self) -> bool {
        matches!(self, Event::GoalReached { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_tag() {
        let event = Event::StreakReset {
            from: 4,
            at: DateTime::parse_from_rfc3339("2024-03-02T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "streak_reset");
        assert_eq!(json["from"], 4);
    }
}
