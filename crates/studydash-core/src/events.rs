use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recorder::StudySession;
use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// Hosts render from them; recorded sessions travel inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        display_secs: u64,
        run_id: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        display_secs: u64,
        at: DateTime<Utc>,
    },
    /// Displayed time changed because of a tick or a resync.
    Tick {
        display_secs: u64,
    },
    /// Pomodoro countdown reached zero.
    TimerCompleted {
        target_duration_secs: u64,
        session: Option<StudySession>,
        at: DateTime<Utc>,
    },
    TimerReset {
        session: Option<StudySession>,
        at: DateTime<Utc>,
    },
    /// Stopwatch time saved and cleared.
    SessionSaved {
        session: Option<StudySession>,
        at: DateTime<Utc>,
    },
    /// Mode or pomodoro length changed; progress discarded.
    ConfigurationChanged {
        mode: TimerMode,
        target_duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        running: bool,
        display_secs: u64,
        display: String,
        target_duration_secs: u64,
        selected_subject_id: String,
        background: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Session carried by this event, if one was recorded.
    pub fn recorded_session(&self) -> Option<&StudySession> {
        match self {
            Event::TimerCompleted { session, .. }
            | Event::TimerReset { session, .. }
            | Event::SessionSaved { session, .. } => session.as_ref(),
            _ => None,
        }
    }
}
