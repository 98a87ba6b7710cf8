//! Integration tests for the daily ledger on a real SQLite store.

use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fitquest_core::{
    DailyLedger, DailyTotals, Database, EntryInput, Event, KvStore, SharedStore, Targets,
};
use proptest::prelude::*;

fn targets() -> Targets {
    Targets {
        calories: 2000,
        protein: 150,
        carbs: 250,
        fats: 70,
    }
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap()
}

fn sqlite() -> SharedStore {
    Rc::new(Database::open_memory().unwrap())
}

#[test]
fn add_add_delete_scenario() {
    let mut ledger = DailyLedger::new(sqlite(), targets());
    ledger.add_entry(EntryInput::new(500, 30, 0, 0), base());
    ledger.add_entry(EntryInput::calories(300), base() + Duration::minutes(5));

    assert_eq!(
        ledger.totals(),
        DailyTotals {
            calories: 800,
            protein: 30,
            carbs: 0,
            fats: 0
        }
    );

    let first = ledger.entries()[0].id.clone();
    ledger.delete_entry(&first);
    assert_eq!(
        ledger.totals(),
        DailyTotals {
            calories: 300,
            protein: 0,
            carbs: 0,
            fats: 0
        }
    );
}

#[test]
fn goal_fires_exactly_once_at_target() {
    let mut ledger = DailyLedger::new(sqlite(), targets());
    let mut goals = 0;
    for (i, kcal) in [1000, 1000, 250, 50].into_iter().enumerate() {
        let events = ledger.add_entry(EntryInput::calories(kcal), base() + Duration::minutes(i as i64));
        goals += events.iter().filter(|e| e.is_goal_reached()).count();
    }
    assert_eq!(ledger.totals().calories, 2300);
    assert_eq!(goals, 1);
}

#[test]
fn crossing_again_after_dropping_below_fires_again() {
    let mut ledger = DailyLedger::new(sqlite(), targets());
    ledger.add_entry(EntryInput::calories(2100), base());
    let id = ledger.entries()[0].id.clone();
    ledger.edit_entry(&id, EntryInput::calories(1500));

    let events = ledger.add_entry(EntryInput::calories(600), base() + Duration::hours(1));
    assert!(matches!(events.last(), Some(Event::GoalReached { calories: 2100, .. })));
}

#[test]
fn ledger_reloads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitquest.db");
    let saved_entries = {
        let store: SharedStore = Rc::new(Database::open_at(&path).unwrap());
        let mut ledger = DailyLedger::new(store, targets());
        ledger.add_entry(EntryInput::new(420, 35, 12, 18), base());
        ledger.add_entry(EntryInput::new(180, 4, 30, 2), base() + Duration::hours(3));
        ledger.entries().to_vec()
    };

    let store: SharedStore = Rc::new(Database::open_at(&path).unwrap());
    let ledger = DailyLedger::load(store.clone(), targets());
    assert_eq!(ledger.entries(), saved_entries.as_slice());
    assert_eq!(ledger.totals().calories, 600);
    assert_eq!(store.load("fats").unwrap().as_deref(), Some("20"));
}

#[derive(Debug, Clone)]
enum Op {
    Add(EntryInput),
    Edit(usize, EntryInput),
    Delete(usize),
    DeleteMissing,
}

fn input() -> impl Strategy<Value = EntryInput> {
    (0u32..5000, 0u32..300, 0u32..500, 0u32..200)
        .prop_map(|(c, p, cb, f)| EntryInput::new(c, p, cb, f))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => input().prop_map(Op::Add),
        2 => (any::<usize>(), input()).prop_map(|(i, e)| Op::Edit(i, e)),
        2 => any::<usize>().prop_map(Op::Delete),
        1 => Just(Op::DeleteMissing),
    ]
}

proptest! {
    #[test]
    fn totals_always_equal_sum_of_entries(ops in prop::collection::vec(op(), 0..40)) {
        let store: SharedStore = Rc::new(fitquest_core::MemoryStore::new());
        let mut ledger = DailyLedger::new(store, targets());

        for (step, op) in ops.into_iter().enumerate() {
            let len = ledger.entries().len();
            match op {
                Op::Add(input) => {
                    ledger.add_entry(input, base() + Duration::seconds(step as i64));
                }
                Op::Edit(i, input) if len > 0 => {
                    let id = ledger.entries()[i % len].id.clone();
                    prop_assert!(ledger.edit_entry(&id, input).is_some());
                }
                Op::Delete(i) if len > 0 => {
                    let id = ledger.entries()[i % len].id.clone();
                    prop_assert!(ledger.delete_entry(&id).is_some());
                }
                Op::DeleteMissing => {
                    prop_assert!(ledger.delete_entry("not-an-id").is_none());
                }
                _ => {}
            }

            let expected = ledger.entries().iter().fold(DailyTotals::default(), |acc, e| DailyTotals {
                calories: acc.calories + e.calories,
                protein: acc.protein + e.protein,
                carbs: acc.carbs + e.carbs,
                fats: acc.fats + e.fats,
            });
            prop_assert_eq!(ledger.totals(), expected);
        }
    }
}
