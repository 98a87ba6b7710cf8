pub mod calendar;
mod level;
mod tracker;

pub use calendar::{day_relation, DayRelation};
pub use level::LevelTier;
pub use tracker::{StreakState, StreakTracker, Transition};
