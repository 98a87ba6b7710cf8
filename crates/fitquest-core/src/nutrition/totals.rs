use serde::{Deserialize, Serialize};

use super::Entry;

/// Running totals for the day. Always derived from the entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl DailyTotals {
    /// Elementwise sum over `entries`, saturating at `u32::MAX`.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            calories: acc.calories.saturating_add(e.calories),
            protein: acc.protein.saturating_add(e.protein),
            carbs: acc.carbs.saturating_add(e.carbs),
            fats: acc.fats.saturating_add(e.fats),
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
