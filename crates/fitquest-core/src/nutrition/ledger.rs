//! The day's entry list and the totals derived from it.
//!
//! Totals are cached for cheap reads, but the cache is only ever assigned
//! from [`DailyLedger::recompute_totals`], the fold over the entry list.
//! Every mutation persists the entry list and the four total keys; storage
//! failures are logged and the in-memory ledger stays authoritative.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{DailyProgress, DailyTotals, Entry, EntryInput, Targets};
use crate::events::Event;
use crate::storage::{keys, SharedStore};

pub struct DailyLedger {
    store: SharedStore,
    targets: Targets,
    alert_ms: u64,
    entries: Vec<Entry>,
    totals: DailyTotals,
}

impl DailyLedger {
    /// Empty ledger. Nothing is read from or written to `store` until the
    /// first mutation.
    pub fn new(store: SharedStore, targets: Targets) -> Self {
        Self {
            store,
            targets,
            alert_ms: 0,
            entries: Vec::new(),
            totals: DailyTotals::default(),
        }
    }

    /// Ledger restored from the `entries` key.
    ///
    /// Totals are recomputed from the restored list; if the stored total keys
    /// disagree they are rewritten. Elements that cannot be read are skipped.
    /// When anything was skipped, or the list is not JSON at all, storage is
    /// left untouched until the next mutation.
    pub fn load(store: SharedStore, targets: Targets) -> Self {
        let mut ledger = Self::new(store, targets);
        let (entries, intact) = match ledger.store.load(keys::ENTRIES) {
            Ok(Some(json)) => decode_entries(&json),
            Ok(None) => (Vec::new(), true),
            Err(e) => {
                warn!(error = %e, "failed to load entries, continuing with session-only ledger");
                return ledger;
            }
        };
        ledger.entries = entries;
        ledger.totals = ledger.recompute_totals();

        if intact && ledger.stored_totals() != Some(ledger.totals) {
            debug!(totals = ?ledger.totals, "stored totals out of date, rewriting");
            ledger.persist_totals();
        }
        ledger
    }

    /// Haptic/alert length carried by goal signals.
    pub fn with_alert_ms(mut self, alert_ms: u64) -> Self {
        self.alert_ms = alert_ms;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn totals(&self) -> DailyTotals {
        self.totals
    }

    pub fn targets(&self) -> Targets {
        self.targets
    }

    pub fn progress(&self) -> DailyProgress {
        DailyProgress::compute(&self.totals, &self.targets)
    }

    /// Pure fold over the current entry list.
    pub fn recompute_totals(&self) -> DailyTotals {
        DailyTotals::from_entries(&self.entries)
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn set_targets(&mut self, targets: Targets) {
        self.targets = targets;
    }

    /// Append a new entry created at `at`.
    ///
    /// Returns `EntryAdded`, followed by `GoalReached` when this add moves the
    /// calorie total from below the target to at or above it.
    pub fn add_entry(&mut self, input: EntryInput, at: DateTime<Utc>) -> Vec<Event> {
        let before = self.totals;

        let mut timestamp = at.timestamp_millis();
        while self.entries.iter().any(|e| e.timestamp == timestamp) {
            timestamp += 1;
        }
        let entry = Entry::new(timestamp, input);
        self.entries.push(entry.clone());
        self.refresh();

        debug!(id = %entry.id, calories = entry.calories, "entry added");
        let mut events = vec![Event::EntryAdded {
            entry,
            totals: self.totals,
        }];

        let target = self.targets.calories;
        if target > 0 && before.calories < target && self.totals.calories >= target {
            info!(calories = self.totals.calories, target, "calorie goal reached");
            events.push(Event::GoalReached {
                calories: self.totals.calories,
                target,
                alert_ms: self.alert_ms,
                at,
            });
        }
        events
    }

    /// Replace all four values of an existing entry. Unknown ids are ignored.
    pub fn edit_entry(&mut self, id: &str, input: EntryInput) -> Option<Event> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!(id, "edit ignored, no such entry");
            return None;
        };
        entry.apply(input);
        let entry = entry.clone();
        self.refresh();

        Some(Event::EntryEdited {
            entry,
            totals: self.totals,
        })
    }

    /// Remove an entry. Unknown ids are ignored.
    pub fn delete_entry(&mut self, id: &str) -> Option<Event> {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            debug!(id, "delete ignored, no such entry");
            return None;
        };
        let removed = self.entries.remove(pos);
        self.refresh();

        Some(Event::EntryDeleted {
            id: removed.id,
            totals: self.totals,
        })
    }

    /// Empty the ledger for a new day and persist the cleared state.
    /// Returns how many entries were dropped.
    pub fn start_new_day(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        self.refresh();
        cleared
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn refresh(&mut self) {
        self.totals = self.recompute_totals();
        self.persist_entries();
        self.persist_totals();
    }

    fn persist_entries(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode entries");
                return;
            }
        };
        if let Err(e) = self.store.save(keys::ENTRIES, &json) {
            warn!(error = %e, "failed to save entries");
        }
    }

    fn persist_totals(&self) {
        let fields = [
            (keys::CALORIES, self.totals.calories),
            (keys::PROTEIN, self.totals.protein),
            (keys::CARBS, self.totals.carbs),
            (keys::FATS, self.totals.fats),
        ];
        for (key, value) in fields {
            if let Err(e) = self.store.save(key, &value.to_string()) {
                warn!(key, error = %e, "failed to save total");
            }
        }
    }

    fn stored_totals(&self) -> Option<DailyTotals> {
        let read = |key: &str| -> Option<u32> {
            self.store.load(key).ok().flatten()?.trim().parse().ok()
        };
        Some(DailyTotals {
            calories: read(keys::CALORIES)?,
            protein: read(keys::PROTEIN)?,
            carbs: read(keys::CARBS)?,
            fats: read(keys::FATS)?,
        })
    }
}

/// Decode a stored entry list one element at a time. The flag is false when
/// anything had to be dropped.
fn decode_entries(json: &str) -> (Vec<Entry>, bool) {
    let raw: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "stored entries are not valid JSON, starting empty");
            return (Vec::new(), false);
        }
    };
    let stored = raw.len();
    let entries: Vec<Entry> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable stored entry");
                None
            }
        })
        .collect();
    let intact = entries.len() == stored;
    (entries, intact)
}
