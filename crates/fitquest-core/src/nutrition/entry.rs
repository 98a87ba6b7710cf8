use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// One logged intake record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Creation time in epoch milliseconds, as a decimal string.
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, deserialize_with = "stored_amount")]
    pub calories: u32,
    #[serde(default, deserialize_with = "stored_amount")]
    pub protein: u32,
    #[serde(default, deserialize_with = "stored_amount")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "stored_amount")]
    pub fats: u32,
}

/// Reads an amount from older stored data, where negative, fractional or
/// quoted numbers may appear. Negatives become 0 and large values saturate.
fn stored_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        Raw::Float(n) if n.is_nan() || n <= 0.0 => 0,
        Raw::Float(n) => n.min(f64::from(u32::MAX)) as u32,
        Raw::Text(s) => leading_int(&s).unwrap_or(0),
    })
}

impl Entry {
    pub(crate) fn new(timestamp: i64, input: EntryInput) -> Self {
        Self {
            id: timestamp.to_string(),
            timestamp,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fats: input.fats,
        }
    }

    pub(crate) fn apply(&mut self, input: EntryInput) {
        self.calories = input.calories;
        self.protein = input.protein;
        self.carbs = input.carbs;
        self.fats = input.fats;
    }

    /// Creation time, if the stored timestamp is in range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Current values as an input, e.g. to prefill an edit form.
    pub fn input(&self) -> EntryInput {
        EntryInput {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

/// Parsed values of an add or edit submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl EntryInput {
    pub fn new(calories: u32, protein: u32, carbs: u32, fats: u32) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    pub fn calories(calories: u32) -> Self {
        Self {
            calories,
            ..Self::default()
        }
    }

    /// Parse raw form fields.
    ///
    /// Calories are mandatory; macros that are empty or not numeric count as 0.
    /// A field is read up to its first non-digit, so "250g" is 250 and "12.5"
    /// is 12.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidCalories`] if the calories field does
    /// not start with a whole number.
    pub fn parse(
        calories: &str,
        protein: &str,
        carbs: &str,
        fats: &str,
    ) -> Result<Self, ValidationError> {
        let kcal = leading_int(calories).ok_or_else(|| ValidationError::InvalidCalories {
            value: calories.to_string(),
        })?;
        Ok(Self {
            calories: kcal,
            protein: leading_int(protein).unwrap_or(0),
            carbs: leading_int(carbs).unwrap_or(0),
            fats: leading_int(fats).unwrap_or(0),
        })
    }
}

/// Leading run of ASCII digits after optional whitespace and `+`.
fn leading_int(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
