//! Study-time statistics over recorded sessions.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::recorder::StudySession;

/// Days covered by the rolling weekly window, today included.
pub const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total_sessions: u64,
    pub total_secs: u64,
    pub today_secs: u64,
    /// Sessions dated from seven days ago through today.
    pub week_secs: u64,
    /// `week_secs / 7`, rounded to the nearest second.
    pub daily_avg_secs: u64,
    /// The last seven days, oldest first, including days without study.
    pub last_7_days: Vec<DailyTotal>,
    pub by_subject: BTreeMap<String, u64>,
}

impl StudyStats {
    pub fn compute(sessions: &[StudySession], today: NaiveDate) -> Self {
        let week_start = today - Duration::days(WEEK_DAYS);
        let mut stats = StudyStats {
            last_7_days: (0..WEEK_DAYS)
                .rev()
                .map(|back| DailyTotal {
                    date: today - Duration::days(back),
                    seconds: 0,
                })
                .collect(),
            ..Default::default()
        };

        for session in sessions {
            let secs = session.duration_seconds;
            stats.total_sessions += 1;
            stats.total_secs += secs;
            *stats.by_subject.entry(session.subject.clone()).or_default() += secs;

            if session.date == today {
                stats.today_secs += secs;
            }
            if session.date >= week_start && session.date <= today {
                stats.week_secs += secs;
            }
            if let Some(day) = stats
                .last_7_days
                .iter_mut()
                .find(|d| d.date == session.date)
            {
                day.seconds += secs;
            }
        }
        stats.daily_avg_secs = rounded_div(stats.week_secs, WEEK_DAYS as u64);
        stats
    }
}

fn rounded_div(total: u64, parts: u64) -> u64 {
    (total + parts / 2) / parts
}

/// `HH:MM:SS`, hours zero-padded and unbounded.
pub fn format_clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Coarse total such as `3h 25m`.
pub fn format_total(secs: u64) -> String {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
