//! Shared plumbing for CLI commands: opening the app, time, output.

use std::rc::Rc;

use chrono::{DateTime, FixedOffset, Local, Utc};
use fitquest_core::{App, Config, Database, Event, MemoryStore, SharedStore};
use serde::Serialize;
use tracing::warn;

/// Resolve `--at`, defaulting to the local clock.
pub fn now(at: Option<&str>) -> Result<DateTime<FixedOffset>, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| format!("invalid --at value '{raw}': {e}").into()),
        None => Ok(Local::now().fixed_offset()),
    }
}

/// Open the app for one activation.
///
/// Falls back to a session-only store when the database cannot be opened,
/// so a broken data directory never blocks the command.
pub fn open_app(at: Option<&str>) -> Result<(App, DateTime<FixedOffset>), Box<dyn std::error::Error>> {
    let now = now(at)?;
    let store: SharedStore = match Database::open() {
        Ok(db) => Rc::new(db),
        Err(e) => {
            warn!(error = %e, "database unavailable, changes will not be saved");
            Rc::new(MemoryStore::new())
        }
    };
    let app = App::open(store, Config::load_or_default(), &now);
    Ok((app, now))
}

/// Print queued events to stderr, one JSON object per line.
pub fn flush_events(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    for event in app.drain_events() {
        if let Event::GoalReached {
            calories, target, ..
        } = &event
        {
            eprintln!("GOAL REACHED: {calories} / {target} kcal");
        }
        eprintln!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn utc(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    now.with_timezone(&Utc)
}
