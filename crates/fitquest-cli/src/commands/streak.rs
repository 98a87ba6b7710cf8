use serde::Serialize;

use crate::common::{flush_events, open_app, print_json};

#[derive(Serialize)]
struct StreakView {
    streak: u32,
    level: &'static str,
    badge: &'static str,
    last_login: Option<String>,
}

pub fn run(at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, _) = open_app(at)?;
    let tracker = app.streak();
    let level = tracker.level();
    print_json(&StreakView {
        streak: tracker.current_streak(),
        level: level.name(),
        badge: level.emoji(),
        last_login: tracker.state().last_login.map(|d| d.to_rfc3339()),
    })?;
    flush_events(&mut app)
}
