//! Entry point for UI shells.
//!
//! [`App`] owns the single authoritative ledger and streak tracker, both bound
//! to the same store, plus the settings they are configured with. A shell
//! calls [`App::on_focus`] on every activation, forwards user actions, renders
//! [`App::snapshot`] and plays whatever [`App::drain_events`] returns.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::Event;
use crate::nutrition::{
    DailyLedger, DailyProgress, DailyTotals, Entry, EntryInput, Targets, TrackingFlags,
};
use crate::storage::{Config, SharedStore};
use crate::streak::{LevelTier, StreakTracker, Transition};

/// Everything a shell needs to draw the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub totals: DailyTotals,
    pub targets: Targets,
    pub tracking: TrackingFlags,
    pub entries: Vec<Entry>,
    pub streak: u32,
    pub level: LevelTier,
    pub last_login: Option<DateTime<FixedOffset>>,
    pub progress: DailyProgress,
}

pub struct App {
    store: SharedStore,
    config: Config,
    targets: Targets,
    tracking: TrackingFlags,
    ledger: DailyLedger,
    streak: StreakTracker,
    events: Vec<Event>,
}

impl App {
    /// Load all persisted state and run the activation check for `now`.
    pub fn open<Tz: TimeZone>(store: SharedStore, config: Config, now: &DateTime<Tz>) -> Self {
        let targets = Targets::load(&*store, config.default_targets()).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load targets, using defaults");
            config.default_targets()
        });
        let tracking = TrackingFlags::load(&*store).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load tracking flags, using defaults");
            TrackingFlags::default()
        });
        let ledger = DailyLedger::load(store.clone(), targets).with_alert_ms(config.alert_ms());
        let streak = StreakTracker::load(store.clone());

        let mut app = Self {
            store,
            config,
            targets,
            tracking,
            ledger,
            streak,
            events: Vec::new(),
        };
        app.on_focus(now);
        app
    }

    /// Activation hook: evaluate the streak first, then refresh settings
    /// from storage. On a read failure the in-memory settings are kept.
    ///
    /// Entries are not re-read here: the ledger loaded by [`App::open`] is the
    /// only writer of the entry list, so entries written to the same store by
    /// another process only show up in a freshly opened `App`.
    pub fn on_focus<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Transition {
        let pending = self.ledger.entries().len();
        let transition = self.streak.evaluate(now, &mut self.ledger);
        let at = now.with_timezone(&Utc);
        if let Some(event) = transition.event(at) {
            self.events.push(event);
        }
        if transition.day_changed() {
            self.events.push(Event::DayCleared {
                entries_cleared: pending,
                at,
            });
        }

        match Targets::load(&*self.store, self.config.default_targets()) {
            Ok(targets) => {
                self.targets = targets;
                self.ledger.set_targets(targets);
            }
            Err(e) => warn!(error = %e, "keeping in-memory targets"),
        }
        match TrackingFlags::load(&*self.store) {
            Ok(flags) => self.tracking = flags,
            Err(e) => warn!(error = %e, "keeping in-memory tracking flags"),
        }
        transition
    }

    /// Submit the add form. Returns false, changing nothing, when the
    /// calories field is not a number.
    pub fn add_entry(
        &mut self,
        calories: &str,
        protein: &str,
        carbs: &str,
        fats: &str,
        at: DateTime<Utc>,
    ) -> bool {
        match EntryInput::parse(calories, protein, carbs, fats) {
            Ok(input) => {
                self.add_input(input, at);
                true
            }
            Err(e) => {
                debug!(error = %e, "add discarded");
                false
            }
        }
    }

    pub fn add_input(&mut self, input: EntryInput, at: DateTime<Utc>) {
        let events = self.ledger.add_entry(input, at);
        self.events.extend(events);
    }

    /// Submit the edit form for `id`. Returns false when the calories field
    /// is not a number or the entry does not exist.
    pub fn edit_entry(
        &mut self,
        id: &str,
        calories: &str,
        protein: &str,
        carbs: &str,
        fats: &str,
    ) -> bool {
        let input = match EntryInput::parse(calories, protein, carbs, fats) {
            Ok(input) => input,
            Err(e) => {
                debug!(id, error = %e, "edit discarded");
                return false;
            }
        };
        self.edit_input(id, input)
    }

    pub fn edit_input(&mut self, id: &str, input: EntryInput) -> bool {
        match self.ledger.edit_entry(id, input) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Returns false when the entry does not exist.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        match self.ledger.delete_entry(id) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Update targets in memory and write the four target keys.
    pub fn save_targets(&mut self, targets: Targets) {
        self.targets = targets;
        self.ledger.set_targets(targets);
        if let Err(e) = targets.save(&*self.store) {
            warn!(error = %e, "failed to save targets");
        }
        self.events.push(Event::TargetsSaved { targets });
    }

    pub fn save_tracking(&mut self, tracking: TrackingFlags) {
        self.tracking = tracking;
        if let Err(e) = tracking.save(&*self.store) {
            warn!(error = %e, "failed to save tracking flags");
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            totals: self.ledger.totals(),
            targets: self.targets,
            tracking: self.tracking,
            entries: self.ledger.entries().to_vec(),
            streak: self.streak.current_streak(),
            level: self.streak.level(),
            last_login: self.streak.state().last_login,
            progress: self.ledger.progress(),
        }
    }

    pub fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn targets(&self) -> Targets {
        self.targets
    }

    pub fn tracking(&self) -> TrackingFlags {
        self.tracking
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
