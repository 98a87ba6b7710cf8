//! Daily streak state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Uninitialized -> Active(1) -> Active(n) -> Active(n + 1)
//!                                   \-> Reset -> Active(1)
//! ```
//!
//! There is no stored state enum: the transition is decided by comparing the
//! calendar date of the last activation with today. Any day change also clears
//! the daily ledger.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::calendar::{day_relation, DayRelation};
use super::LevelTier;
use crate::events::Event;
use crate::nutrition::DailyLedger;
use crate::storage::{keys, SharedStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub last_login: Option<DateTime<FixedOffset>>,
    /// Always at least 1.
    pub current_streak: u32,
}

impl Default for StreakState {
    fn default() -> Self {
        Self {
            last_login: None,
            current_streak: 1,
        }
    }
}

/// Outcome of one [`StreakTracker::evaluate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Started,
    Unchanged,
    Advanced { from: u32, to: u32 },
    Reset { from: u32 },
}

impl Transition {
    /// Whether a new calendar day began, which empties the ledger.
    pub fn day_changed(&self) -> bool {
        matches!(self, Transition::Advanced { .. } | Transition::Reset { .. })
    }

    pub fn event(&self, at: DateTime<Utc>) -> Option<Event> {
        match *self {
            Transition::Started => Some(Event::StreakStarted { at }),
            Transition::Unchanged => None,
            Transition::Advanced { from, to } => Some(Event::StreakAdvanced { from, to, at }),
            Transition::Reset { from } => Some(Event::StreakReset { from, at }),
        }
    }
}

pub struct StreakTracker {
    store: SharedStore,
    state: StreakState,
}

impl StreakTracker {
    /// Fresh, uninitialized tracker.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            state: StreakState::default(),
        }
    }

    /// Restore from `lastLoginDate` and `currentStreak`.
    ///
    /// Unreadable or invalid values fall back to no last login and a streak
    /// of 1; nothing here can fail.
    pub fn load(store: SharedStore) -> Self {
        let last_login = match store.load(keys::LAST_LOGIN_DATE) {
            Ok(Some(raw)) => DateTime::parse_from_rfc3339(raw.trim())
                .map_err(|e| warn!(value = %raw, error = %e, "ignoring unparseable last login date"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to load last login date");
                None
            }
        };

        let current_streak = match store.load(keys::CURRENT_STREAK) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    warn!(value = %raw, "invalid stored streak, using 1");
                    1
                }
            },
            Ok(None) => 1,
            Err(e) => {
                warn!(error = %e, "failed to load streak, using 1");
                1
            }
        };

        Self {
            store,
            state: StreakState {
                last_login,
                current_streak,
            },
        }
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    pub fn current_streak(&self) -> u32 {
        self.state.current_streak
    }

    pub fn level(&self) -> LevelTier {
        LevelTier::for_streak(self.state.current_streak)
    }

    /// Apply at most one transition for the calendar day of `now`.
    ///
    /// Calling this again on the same day returns [`Transition::Unchanged`]
    /// and leaves the streak and the ledger alone. `lastLoginDate` is
    /// rewritten on every call.
    pub fn evaluate<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        ledger: &mut DailyLedger,
    ) -> Transition {
        let today = now.date_naive();
        let relation = self
            .state
            .last_login
            .map(|last| day_relation(last.with_timezone(&now.timezone()).date_naive(), today));
        self.record_login(now.fixed_offset());

        let streak = self.state.current_streak;
        let transition = match relation {
            Some(DayRelation::SameDay) => return Transition::Unchanged,
            None => Transition::Started,
            Some(DayRelation::Consecutive) => Transition::Advanced {
                from: streak,
                to: streak.saturating_add(1),
            },
            Some(DayRelation::Gap(_)) | Some(DayRelation::Future) => Transition::Reset { from: streak },
        };

        match transition {
            Transition::Advanced { to, .. } => self.set_streak(to),
            _ => self.set_streak(1),
        }
        info!(?transition, streak = self.state.current_streak, "streak evaluated");

        if transition.day_changed() {
            let cleared = ledger.start_new_day();
            info!(cleared, "new day, ledger cleared");
        }
        transition
    }

    fn record_login(&mut self, now: DateTime<FixedOffset>) {
        self.state.last_login = Some(now);
        if let Err(e) = self.store.save(keys::LAST_LOGIN_DATE, &now.to_rfc3339()) {
            warn!(error = %e, "failed to save last login date");
        }
    }

    fn set_streak(&mut self, streak: u32) {
        self.state.current_streak = streak.max(1);
        if let Err(e) = self
            .store
            .save(keys::CURRENT_STREAK, &self.state.current_streak.to_string())
        {
            warn!(error = %e, "failed to save streak");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{EntryInput, Targets};
    use crate::storage::testing::BrokenStore;
    use crate::storage::{KvStore, MemoryStore};
    use chrono::Duration;
    use std::rc::Rc;

    fn targets() -> Targets {
        Targets {
            calories: 2000,
            protein: 150,
            carbs: 250,
            fats: 70,
        }
    }

    fn day(n: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, n, hour, 0, 0).unwrap()
    }

    fn setup() -> (Rc<MemoryStore>, StreakTracker, DailyLedger) {
        let store = Rc::new(MemoryStore::new());
        let tracker = StreakTracker::load(store.clone());
        let ledger = DailyLedger::new(store.clone(), targets());
        (store, tracker, ledger)
    }

    #[test]
    fn first_activation_starts_at_one() {
        let (store, mut tracker, mut ledger) = setup();
        assert_eq!(tracker.evaluate(&day(1, 9), &mut ledger), Transition::Started);
        assert_eq!(tracker.current_streak(), 1);
        assert_eq!(store.load("currentStreak").unwrap().as_deref(), Some("1"));
        assert!(store.load("lastLoginDate").unwrap().is_some());
    }

    #[test]
    fn same_day_is_idempotent() {
        let (_, mut tracker, mut ledger) = setup();
        tracker.evaluate(&day(1, 9), &mut ledger);
        ledger.add_entry(EntryInput::calories(400), day(1, 10));

        assert_eq!(tracker.evaluate(&day(1, 23), &mut ledger), Transition::Unchanged);
        assert_eq!(tracker.evaluate(&day(1, 23), &mut ledger), Transition::Unchanged);
        assert_eq!(tracker.current_streak(), 1);
        assert_eq!(ledger.totals().calories, 400);
    }

    #[test]
    fn same_day_only_touches_last_login() {
        let (store, mut tracker, mut ledger) = setup();
        tracker.evaluate(&day(1, 9), &mut ledger);
        ledger.add_entry(EntryInput::calories(400), day(1, 10));
        store.save("currentStreak", "6").unwrap();
        let entries_before = store.load("entries").unwrap();

        assert_eq!(tracker.evaluate(&day(1, 21), &mut ledger), Transition::Unchanged);
        assert_eq!(store.load("currentStreak").unwrap().as_deref(), Some("6"));
        assert_eq!(store.load("entries").unwrap(), entries_before);
        assert_eq!(
            store.load("lastLoginDate").unwrap().as_deref(),
            Some("2024-05-01T21:00:00+00:00")
        );
    }

    #[test]
    fn consecutive_days_advance_and_clear_ledger() {
        let (_, mut tracker, mut ledger) = setup();
        tracker.evaluate(&day(1, 22), &mut ledger);
        ledger.add_entry(EntryInput::new(900, 40, 10, 5), day(1, 22));

        let transition = tracker.evaluate(&day(2, 7), &mut ledger);
        assert_eq!(transition, Transition::Advanced { from: 1, to: 2 });
        assert!(ledger.entries().is_empty());
        assert!(ledger.totals().is_zero());

        assert_eq!(
            tracker.evaluate(&day(3, 7), &mut ledger),
            Transition::Advanced { from: 2, to: 3 }
        );
    }

    #[test]
    fn gap_resets_to_one() {
        let (_, mut tracker, mut ledger) = setup();
        for n in 1..=4 {
            tracker.evaluate(&day(n, 8), &mut ledger);
        }
        assert_eq!(tracker.current_streak(), 4);
        ledger.add_entry(EntryInput::calories(100), day(4, 9));

        assert_eq!(tracker.evaluate(&day(6, 8), &mut ledger), Transition::Reset { from: 4 });
        assert_eq!(tracker.current_streak(), 1);
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn clock_moving_backwards_resets() {
        let (_, mut tracker, mut ledger) = setup();
        tracker.evaluate(&day(5, 8), &mut ledger);
        tracker.evaluate(&day(6, 8), &mut ledger);
        assert_eq!(tracker.evaluate(&day(4, 8), &mut ledger), Transition::Reset { from: 2 });
    }

    #[test]
    fn midnight_boundary_uses_calendar_date() {
        let (_, mut tracker, mut ledger) = setup();
        let late = Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 0).unwrap();
        tracker.evaluate(&late, &mut ledger);
        let transition = tracker.evaluate(&(late + Duration::minutes(2)), &mut ledger);
        assert_eq!(transition, Transition::Advanced { from: 1, to: 2 });

        // 05-02 00:01 -> 05-04 00:59 skips a day.
        let transition = tracker.evaluate(&(late + Duration::hours(49)), &mut ledger);
        assert_eq!(transition, Transition::Reset { from: 2 });
    }

    #[test]
    fn dates_compare_in_the_callers_time_zone() {
        let (_, mut tracker, mut ledger) = setup();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2024-05-01 20:00 UTC is already 2024-05-02 in Tokyo.
        tracker.evaluate(&day(1, 20).with_timezone(&tokyo), &mut ledger);
        let next = tokyo.with_ymd_and_hms(2024, 5, 2, 23, 0, 0).unwrap();
        assert_eq!(tracker.evaluate(&next, &mut ledger), Transition::Unchanged);
    }

    #[test]
    fn state_survives_reload() {
        let (store, mut tracker, mut ledger) = setup();
        tracker.evaluate(&day(1, 8), &mut ledger);
        tracker.evaluate(&day(2, 8), &mut ledger);

        let mut reloaded = StreakTracker::load(store.clone());
        assert_eq!(reloaded.current_streak(), 2);
        assert_eq!(
            reloaded.evaluate(&day(3, 8), &mut ledger),
            Transition::Advanced { from: 2, to: 3 }
        );
    }

    #[test]
    fn accepts_javascript_iso_strings() {
        let store = Rc::new(MemoryStore::new());
        store.save("lastLoginDate", "2024-05-01T18:30:00.000Z").unwrap();
        store.save("currentStreak", "7").unwrap();
        let mut tracker = StreakTracker::load(store.clone());
        let mut ledger = DailyLedger::new(store, targets());
        assert_eq!(
            tracker.evaluate(&day(2, 9), &mut ledger),
            Transition::Advanced { from: 7, to: 8 }
        );
    }

    #[test]
    fn garbage_state_falls_back_to_defaults() {
        let store = Rc::new(MemoryStore::new());
        store.save("lastLoginDate", "yesterday-ish").unwrap();
        store.save("currentStreak", "0").unwrap();
        let tracker = StreakTracker::load(store);
        assert_eq!(tracker.state(), &StreakState::default());
    }

    #[test]
    fn broken_store_never_blocks() {
        let store: SharedStore = Rc::new(BrokenStore);
        let mut tracker = StreakTracker::load(store.clone());
        let mut ledger = DailyLedger::new(store, targets());
        assert_eq!(tracker.evaluate(&day(1, 8), &mut ledger), Transition::Started);
        assert_eq!(
            tracker.evaluate(&day(2, 8), &mut ledger),
            Transition::Advanced { from: 1, to: 2 }
        );
        assert_eq!(tracker.level(), LevelTier::Citizen);
    }

    #[test]
    fn transitions_map_to_events() {
        let at = day(1, 0);
        assert!(Transition::Unchanged.event(at).is_none());
        assert_eq!(
            Transition::Reset { from: 3 }.event(at),
            Some(Event::StreakReset { from: 3, at })
        );
        assert!(!Transition::Started.day_changed());
    }
}
