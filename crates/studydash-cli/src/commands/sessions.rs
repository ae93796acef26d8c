use clap::Subcommand;
use studydash_core::storage::SESSIONS_KEY;
use studydash_core::{format_clock, Database, PersistenceAdapter, StudySession};

use super::print_json;

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List recorded sessions, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionsAction::List { json } => {
            let sessions: Vec<StudySession> = db.load_list(SESSIONS_KEY)?;
            if json {
                print_json(&sessions)?;
            } else {
                for session in sessions {
                    println!(
                        "{}  {}  {}",
                        session.date,
                        format_clock(session.duration_seconds),
                        session.subject
                    );
                }
            }
        }
    }
    Ok(())
}
