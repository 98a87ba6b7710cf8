//! # FitQuest Core Library
//!
//! This library provides the core logic for the FitQuest daily nutrition
//! tracker. Screens, styling and navigation live in a UI shell (the
//! `fitquest-cli` binary in this workspace) that calls into this crate and
//! renders its state.
//!
//! ## Architecture
//!
//! - **Daily Ledger**: the day's entries and the totals folded from them
//! - **Streak Tracker**: a calendar-day state machine run on every activation;
//!   it advances or resets the streak and clears the ledger on a new day
//! - **Storage**: a string key-value store (SQLite or in-memory) plus a TOML
//!   configuration file
//!
//! ## Key Components
//!
//! - [`App`]: Facade a shell talks to
//! - [`DailyLedger`]: Entry list and derived totals
//! - [`StreakTracker`]: Daily streak state machine
//! - [`KvStore`]: Persistence seam, implemented by [`Database`] and [`MemoryStore`]

pub mod app;
pub mod error;
pub mod events;
pub mod nutrition;
pub mod storage;
pub mod streak;

pub use app::{App, Snapshot};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use nutrition::{
    DailyLedger, DailyProgress, DailyTotals, Entry, EntryInput, Targets, TrackingFlags,
};
pub use storage::{Config, Database, KvStore, MemoryStore, SharedStore};
pub use streak::{LevelTier, StreakState, StreakTracker, Transition};
