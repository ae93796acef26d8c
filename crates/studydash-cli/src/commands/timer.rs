use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use tokio::time::{Interval, MissedTickBehavior};
use studydash_core::storage::TIMER_STATE_KEY;
use studydash_core::subjects::list_subjects;
use studydash_core::timer::GENERAL_SUBJECT_ID;
use studydash_core::{
    format_clock, Clock, Config, Database, Event, SystemClock, TimerConfig, TimerEngine, TimerMode,
    TimerState,
};

use super::print_json;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or continue the timer
    Start,
    /// Pause without recording
    Pause,
    /// Stop and reinitialize; a running timer records its progress
    Reset,
    /// Stopwatch only: record elapsed time and clear
    Save,
    /// Print current timer state as JSON
    Status,
    /// Follow the running timer with background ticks
    Watch {
        /// Stop watching after this many seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Switch between stopwatch and pomodoro (discards progress)
    Mode {
        /// "stopwatch" or "pomodoro"
        mode: TimerMode,
    },
    /// Set the pomodoro length in minutes (discards progress)
    Duration {
        #[arg(value_parser = clap::value_parser!(u64).range(1..=180))]
        minutes: u64,
    },
    /// Attribute sessions to a subject id ("general" for none)
    Subject { id: String },
}

/// Restore the persisted timer. A read failure aborts rather than starting
/// fresh, which would overwrite the saved state on exit.
fn load_engine<'a>(
    db: &'a Database,
    clock: Arc<dyn Clock>,
    config: &TimerConfig,
) -> Result<TimerEngine<&'a Database>, Box<dyn std::error::Error>> {
    let saved = db.kv_get(TIMER_STATE_KEY).map_err(|e| {
        tracing::warn!("could not read timer state: {e}");
        e
    })?;
    if let Some(json) = saved {
        match serde_json::from_str::<TimerState>(&json) {
            Ok(state) => return Ok(TimerEngine::restore(state, db, clock, config)),
            Err(e) => tracing::warn!("discarding unreadable timer state: {e}"),
        }
    }
    Ok(TimerEngine::new(db, clock, config))
}

fn save_engine(db: &Database, state: &TimerState) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(state)?;
    db.kv_set(TIMER_STATE_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if let TimerAction::Watch { seconds } = action {
        return watch(seconds, config.timer);
    }

    // One-shot commands have no runtime to tick on.
    let timer_config = TimerConfig {
        background_executor: false,
        ..config.timer
    };
    let db = Database::open()?;
    let mut engine = load_engine(&db, Arc::new(SystemClock), &timer_config)?;

    // Catch up with time that passed since the last invocation.
    let mut events: Vec<Event> = Vec::new();
    if let Some(event @ Event::TimerCompleted { .. }) = engine.resync()? {
        events.push(event);
    }

    let outcome = match action {
        TimerAction::Start => engine.start(),
        TimerAction::Pause => engine.pause()?,
        TimerAction::Reset => engine.reset()?,
        TimerAction::Save => engine.save_and_reset()?,
        TimerAction::Status | TimerAction::Watch { .. } => None,
        TimerAction::Mode { mode } => engine.set_mode(mode),
        TimerAction::Duration { minutes } => engine.set_target_minutes(minutes),
        TimerAction::Subject { id } => {
            let known = id == GENERAL_SUBJECT_ID
                || list_subjects(engine.store())?.iter().any(|s| s.id == id);
            if !known {
                return Err(format!("unknown subject: {id}").into());
            }
            engine.select_subject(id);
            None
        }
    };
    events.extend(outcome);

    save_engine(&db, engine.state())?;
    for event in &events {
        print_json(event)?;
    }
    print_json(&engine.snapshot())?;
    Ok(())
}

fn watch(limit_secs: Option<u64>, config: TimerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch_loop(limit_secs, config))
}

async fn watch_loop(
    limit_secs: Option<u64>,
    config: TimerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut engine = load_engine(&db, Arc::new(SystemClock), &config)?;

    if let Some(event) = engine.resync()? {
        match event {
            Event::Tick { display_secs } => println!("{}", format_clock(display_secs)),
            other => print_json(&other)?,
        }
    }
    if !engine.is_running() {
        save_engine(&db, engine.state())?;
        print_json(&engine.snapshot())?;
        return Ok(());
    }

    let deadline =
        limit_secs.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));
    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    'watch: loop {
        let next = match deadline {
            Some(deadline) => {
                match tokio::time::timeout_at(deadline, next_events(&mut engine, &mut ticker)).await {
                    Ok(next) => next?,
                    Err(_) => break,
                }
            }
            None => next_events(&mut engine, &mut ticker).await?,
        };
        let Some(events) = next else { break };
        for event in events {
            match event {
                Event::Tick { display_secs } => println!("{}", format_clock(display_secs)),
                other => {
                    print_json(&other)?;
                    if !engine.is_running() {
                        break 'watch;
                    }
                }
            }
        }
    }

    save_engine(&db, engine.state())?;
    Ok(())
}

/// Wait for the next batch of timer events: one executor event in the
/// background, or whatever a foreground `pump()` yields each period.
async fn next_events(
    engine: &mut TimerEngine<&Database>,
    ticker: &mut Interval,
) -> Result<Option<Vec<Event>>, Box<dyn std::error::Error>> {
    if engine.is_background() {
        return Ok(engine.recv().await?.map(|event| vec![event]));
    }
    ticker.tick().await;
    Ok(Some(engine.pump()?))
}
