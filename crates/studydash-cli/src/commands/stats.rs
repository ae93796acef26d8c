use clap::Subcommand;
use studydash_core::storage::SESSIONS_KEY;
use studydash_core::{
    format_clock, format_total, Clock, Database, PersistenceAdapter, StudySession, StudyStats,
    SystemClock,
};

use super::print_json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's study time
    Today,
    /// Rolling seven-day totals
    Week,
    /// Everything, including per-subject totals
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let sessions: Vec<StudySession> = db.load_list(SESSIONS_KEY)?;
    let today = SystemClock.today();
    let stats = StudyStats::compute(&sessions, today);

    match action {
        StatsAction::Today => {
            print_json(&serde_json::json!({
                "date": today,
                "today_secs": stats.today_secs,
                "display": format_clock(stats.today_secs),
            }))?;
        }
        StatsAction::Week => {
            print_json(&serde_json::json!({
                "week_secs": stats.week_secs,
                "week_total": format_total(stats.week_secs),
                "daily_avg_secs": stats.daily_avg_secs,
                "daily_avg": format_total(stats.daily_avg_secs),
                "last_7_days": stats.last_7_days,
            }))?;
        }
        StatsAction::All => print_json(&stats)?,
    }
    Ok(())
}
