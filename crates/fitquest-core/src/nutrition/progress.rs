//! Progress bar figures for the home screen.
//!
//! The calorie bar drains: it shows what is left of the budget and shifts
//! from green to red as the budget is used. Macro bars fill up towards their
//! targets and are hidden when the target is 0.

use serde::{Deserialize, Serialize};

use super::{DailyTotals, Targets};

/// Remaining-budget view of calories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieProgress {
    pub consumed: u32,
    pub target: u32,
    /// `target - consumed`; negative once the budget is exceeded.
    pub remaining: i64,
    /// Remaining share of the budget, 0..=100.
    pub fill_pct: f64,
    /// HSL hue for the bar, 120 (green) down to 0 (red).
    pub hue: f64,
}

/// Fill-up view of one macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub consumed: u32,
    pub target: u32,
    /// Consumed share of the target, 0..=100.
    pub fill_pct: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub calories: CalorieProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fats: MacroProgress,
    /// Whether the macro section is shown at all.
    pub macros_visible: bool,
}

impl DailyProgress {
    pub fn compute(totals: &DailyTotals, targets: &Targets) -> Self {
        Self {
            calories: CalorieProgress::compute(totals.calories, targets.calories),
            protein: MacroProgress::compute(totals.protein, targets.protein),
            carbs: MacroProgress::compute(totals.carbs, targets.carbs),
            fats: MacroProgress::compute(totals.fats, targets.fats),
            macros_visible: targets.tracks_macros(),
        }
    }
}

impl CalorieProgress {
    fn compute(consumed: u32, target: u32) -> Self {
        let remaining = i64::from(target) - i64::from(consumed);
        let fill_pct = if target == 0 {
            0.0
        } else {
            (remaining as f64 / f64::from(target) * 100.0).clamp(0.0, 100.0)
        };
        Self {
            consumed,
            target,
            remaining,
            fill_pct,
            hue: fill_pct / 100.0 * 120.0,
        }
    }
}

impl MacroProgress {
    fn compute(consumed: u32, target: u32) -> Self {
        let fill_pct = if target == 0 {
            0.0
        } else {
            (f64::from(consumed) / f64::from(target) * 100.0).min(100.0)
        };
        Self {
            consumed,
            target,
            fill_pct,
            visible: target > 0,
        }
    }
}
