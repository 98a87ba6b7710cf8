use clap::Subcommand;

use crate::common::{flush_events, open_app, print_json};

#[derive(Subcommand)]
pub enum TrackAction {
    /// Print the tracking switches
    Show,
    /// Change one or more tracking switches
    Set {
        #[arg(long)]
        protein: Option<bool>,
        #[arg(long)]
        carbs: Option<bool>,
        #[arg(long)]
        fats: Option<bool>,
    },
}

pub fn run(action: TrackAction, at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, _) = open_app(at)?;

    match action {
        TrackAction::Show => print_json(&app.tracking())?,
        TrackAction::Set {
            protein,
            carbs,
            fats,
        } => {
            let mut flags = app.tracking();
            flags.protein = protein.unwrap_or(flags.protein);
            flags.carbs = carbs.unwrap_or(flags.carbs);
            flags.fats = fats.unwrap_or(flags.fats);
            app.save_tracking(flags);
            print_json(&app.tracking())?;
        }
    }

    flush_events(&mut app)
}
