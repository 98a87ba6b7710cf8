use clap::Subcommand;
use fitquest_core::Targets;

use crate::common::{flush_events, open_app, print_json};

#[derive(Subcommand)]
pub enum TargetsAction {
    /// Print the current daily targets
    Show,
    /// Set all four daily targets (0 hides a macro)
    Set {
        calories: u32,
        protein: u32,
        carbs: u32,
        fats: u32,
    },
}

pub fn run(action: TargetsAction, at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, _) = open_app(at)?;

    match action {
        TargetsAction::Show => print_json(&app.targets())?,
        TargetsAction::Set {
            calories,
            protein,
            carbs,
            fats,
        } => {
            app.save_targets(Targets {
                calories,
                protein,
                carbs,
                fats,
            });
            print_json(&app.targets())?;
        }
    }

    flush_events(&mut app)
}
