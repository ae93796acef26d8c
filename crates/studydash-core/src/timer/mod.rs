mod engine;
mod executor;
mod state;

pub use engine::TimerEngine;
pub use executor::{BackgroundExecutor, ExecutorCommand, ExecutorEvent};
pub use state::{
    display_for, elapsed_secs, start_reference_for, TimerMode, TimerState, DEFAULT_POMODORO_MIN,
    GENERAL_SUBJECT_ID,
};
