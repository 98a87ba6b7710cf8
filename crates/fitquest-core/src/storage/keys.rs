//! Storage key names. These match the layout written by earlier releases of
//! the app, so existing data keeps loading.

pub const CALORIES: &str = "calories";
pub const PROTEIN: &str = "protein";
pub const CARBS: &str = "carbs";
pub const FATS: &str = "fats";

pub const TARGET_CALORIES: &str = "targetCalories";
pub const TARGET_PROTEIN: &str = "targetProtein";
pub const TARGET_CARBS: &str = "targetCarbs";
pub const TARGET_FATS: &str = "targetFats";

pub const ENTRIES: &str = "entries";

pub const LAST_LOGIN_DATE: &str = "lastLoginDate";
pub const CURRENT_STREAK: &str = "currentStreak";

pub const TRACK_PROTEIN: &str = "trackProtein";
pub const TRACK_CARBS: &str = "trackCarbs";
pub const TRACK_FATS: &str = "trackFats";
