use clap::Subcommand;
use studydash_core::subjects::{add_subject, list_subjects, remove_subject};
use studydash_core::{Config, Database};

use super::print_json;

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject (names are unique, ignoring case)
    Add {
        name: String,
        /// Display color; defaults to subjects.default_color
        #[arg(long)]
        color: Option<String>,
    },
    /// List subjects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a subject by id
    Remove { id: String },
}

pub fn run(action: SubjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SubjectAction::Add { name, color } => {
            let color = match color {
                Some(color) => color,
                None => Config::load()?.subjects.default_color,
            };
            let subject = add_subject(&db, &name, &color)?;
            print_json(&subject)?;
        }
        SubjectAction::List { json } => {
            let subjects = list_subjects(&db)?;
            if json {
                print_json(&subjects)?;
            } else if subjects.is_empty() {
                println!("no subjects (sessions are recorded as General)");
            } else {
                for subject in subjects {
                    println!("{}  {}  {}", subject.id, subject.color, subject.name);
                }
            }
        }
        SubjectAction::Remove { id } => {
            if !remove_subject(&db, &id)? {
                return Err(format!("unknown subject: {id}").into());
            }
            println!("removed {id}");
        }
    }
    Ok(())
}
