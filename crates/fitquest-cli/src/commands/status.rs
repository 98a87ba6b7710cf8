use crate::common::{flush_events, open_app, print_json};

pub fn run(at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, _) = open_app(at)?;
    print_json(&app.snapshot())?;
    flush_events(&mut app)
}
