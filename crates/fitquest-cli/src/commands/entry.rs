use clap::Subcommand;

use crate::common::{flush_events, open_app, print_json, utc};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Log food intake
    Add {
        /// Calories (required)
        calories: String,
        /// Protein in grams
        #[arg(long, default_value = "")]
        protein: String,
        /// Carbs in grams
        #[arg(long, default_value = "")]
        carbs: String,
        /// Fats in grams
        #[arg(long, default_value = "")]
        fats: String,
    },
    /// Replace the values of an entry; omitted macros keep their current value
    Edit {
        /// Entry ID
        id: String,
        /// Calories (required)
        calories: String,
        #[arg(long)]
        protein: Option<String>,
        #[arg(long)]
        carbs: Option<String>,
        #[arg(long)]
        fats: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// List today's entries
    List,
}

pub fn run(action: EntryAction, at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut app, now) = open_app(at)?;

    match action {
        EntryAction::Add {
            calories,
            protein,
            carbs,
            fats,
        } => {
            if app.add_entry(&calories, &protein, &carbs, &fats, utc(now)) {
                if let Some(entry) = app.ledger().entries().last() {
                    print_json(entry)?;
                }
            } else {
                eprintln!("entry not recorded: calories must be a whole number");
            }
        }
        EntryAction::Edit {
            id,
            calories,
            protein,
            carbs,
            fats,
        } => {
            let Some(current) = app.ledger().entry(&id).map(|e| e.input()) else {
                eprintln!("no entry with id {id}");
                return flush_events(&mut app);
            };
            let protein = protein.unwrap_or_else(|| current.protein.to_string());
            let carbs = carbs.unwrap_or_else(|| current.carbs.to_string());
            let fats = fats.unwrap_or_else(|| current.fats.to_string());

            if app.edit_entry(&id, &calories, &protein, &carbs, &fats) {
                if let Some(entry) = app.ledger().entry(&id) {
                    print_json(entry)?;
                }
            } else {
                eprintln!("entry not updated: calories must be a whole number");
            }
        }
        EntryAction::Delete { id } => {
            if app.delete_entry(&id) {
                println!("deleted {id}");
            } else {
                eprintln!("no entry with id {id}");
            }
        }
        EntryAction::List => {
            print_json(&app.ledger().entries())?;
        }
    }

    flush_events(&mut app)
}
