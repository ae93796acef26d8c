use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POMODORO_MIN: u64 = 25;

/// Subject id used when the user has not picked (or has no) subjects.
pub const GENERAL_SUBJECT_ID: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Counts up from zero.
    #[default]
    Stopwatch,
    /// Counts down from a target; reaching zero completes the run.
    Pomodoro,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Stopwatch => write!(f, "stopwatch"),
            TimerMode::Pomodoro => write!(f, "pomodoro"),
        }
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stopwatch" => Ok(TimerMode::Stopwatch),
            "pomodoro" => Ok(TimerMode::Pomodoro),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

/// Timer state shared between the engine and its host.
///
/// While running, `start_reference_ms` is authoritative and `display_secs` is
/// only a cached rendering of it: elapsed time is `now - start_reference` in
/// stopwatch mode and `target - (now - start_reference)` in pomodoro mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub target_duration_secs: u64,
    /// Elapsed seconds (stopwatch) or remaining seconds (pomodoro).
    pub display_secs: u64,
    pub running: bool,
    /// Wall-clock ms at which the current run would have started had it
    /// never been paused. `None` while not running.
    #[serde(default)]
    pub start_reference_ms: Option<i64>,
    pub selected_subject_id: String,
    /// Incremented on every start so late events from a previous run can be
    /// told apart.
    #[serde(default)]
    pub run_id: u64,
}

impl TimerState {
    pub fn new(mode: TimerMode, target_duration_secs: u64) -> Self {
        let mut state = Self {
            mode,
            target_duration_secs,
            display_secs: 0,
            running: false,
            start_reference_ms: None,
            selected_subject_id: GENERAL_SUBJECT_ID.to_string(),
            run_id: 0,
        };
        state.display_secs = state.initial_display_secs();
        state
    }

    /// Display value of a freshly reset timer.
    pub fn initial_display_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Stopwatch => 0,
            TimerMode::Pomodoro => self.target_duration_secs,
        }
    }

    /// Seconds of study already spent in this run.
    pub fn consumed_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Stopwatch => self.display_secs,
            TimerMode::Pomodoro => self.target_duration_secs.saturating_sub(self.display_secs),
        }
    }

    /// Whole seconds elapsed since the start reference, truncated.
    pub fn elapsed_at(&self, now_ms: i64) -> Option<u64> {
        self.start_reference_ms
            .map(|reference| elapsed_secs(reference, now_ms))
    }

    /// Display value recomputed from the start reference. In pomodoro mode
    /// this saturates at zero.
    pub fn display_at(&self, now_ms: i64) -> Option<u64> {
        let elapsed = self.elapsed_at(now_ms)?;
        Some(display_for(self.mode, self.target_duration_secs, elapsed))
    }

    /// Put display and running flag back to their initial values.
    pub(crate) fn reinitialize(&mut self) {
        self.running = false;
        self.start_reference_ms = None;
        self.display_secs = self.initial_display_secs();
    }
}

/// Floor of the millisecond delta in whole seconds; a clock that went
/// backwards yields zero.
pub fn elapsed_secs(start_reference_ms: i64, now_ms: i64) -> u64 {
    let delta = now_ms.saturating_sub(start_reference_ms);
    if delta <= 0 {
        0
    } else {
        (delta / 1000) as u64
    }
}

pub fn display_for(mode: TimerMode, target_secs: u64, elapsed_secs: u64) -> u64 {
    match mode {
        TimerMode::Stopwatch => elapsed_secs,
        TimerMode::Pomodoro => target_secs.saturating_sub(elapsed_secs),
    }
}

/// Start reference that makes `consumed_secs` appear already elapsed at `now_ms`.
pub fn start_reference_for(now_ms: i64, consumed_secs: u64) -> i64 {
    let consumed_ms = i64::try_from(consumed_secs)
        .unwrap_or(i64::MAX)
        .saturating_mul(1000);
    now_ms.saturating_sub(consumed_ms)
}
