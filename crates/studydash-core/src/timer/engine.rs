//! Timer engine implementation.
//!
//! The engine keeps one authoritative start reference per run and derives
//! displayed time from it and the wall clock. Ticks only refresh the
//! rendering; they never count time themselves.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Idle (progress kept)
//! Running --reset--> Idle (progress saved, display reinitialized)
//! Running --countdown hits 0--> Idle (full target saved, display 0)
//! ```
//!
//! ## Ticking
//!
//! Inside a tokio runtime the engine owns a [`BackgroundExecutor`] and
//! events arrive through [`TimerEngine::pump`] or [`TimerEngine::recv`].
//! Without one it ticks in the foreground: every `pump()` call at least one
//! period after the previous tick recomputes from the start reference. In
//! both cases a host that was suspended calls [`TimerEngine::resync`] when it
//! becomes visible again.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(store, clock, &config.timer);
//! engine.start();
//! // In the host loop:
//! for event in engine.pump()? { render(&event); }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::executor::{BackgroundExecutor, ExecutorCommand, ExecutorEvent};
use super::state::{start_reference_for, TimerMode, TimerState};
use crate::clock::Clock;
use crate::error::Result;
use crate::events::Event;
use crate::recorder::SessionRecorder;
use crate::stats::format_clock;
use crate::storage::{PersistenceAdapter, TimerConfig};

enum Scheduler {
    Background(BackgroundExecutor),
    Foreground {
        period_ms: i64,
        last_tick_ms: Option<i64>,
    },
}

impl Scheduler {
    fn new(clock: &Arc<dyn Clock>, config: &TimerConfig) -> Self {
        if config.background_executor {
            if let Some(executor) = BackgroundExecutor::spawn(clock.clone(), config.tick_interval()) {
                return Scheduler::Background(executor);
            }
            tracing::warn!("no async runtime available, ticking in the foreground");
        }
        Self::foreground(config.tick_interval_ms)
    }

    fn foreground(period_ms: u64) -> Self {
        Scheduler::Foreground {
            period_ms: i64::try_from(period_ms.max(1)).unwrap_or(1000),
            last_tick_ms: None,
        }
    }

    fn start(&mut self, state: &TimerState, now_ms: i64, period_ms: u64) {
        let sent = match self {
            Scheduler::Background(executor) => {
                let Some(start_reference_ms) = state.start_reference_ms else {
                    return;
                };
                executor.send(ExecutorCommand::Start {
                    run_id: state.run_id,
                    start_reference_ms,
                    mode: state.mode,
                    target_secs: state.target_duration_secs,
                })
            }
            Scheduler::Foreground { last_tick_ms, .. } => {
                *last_tick_ms = Some(now_ms);
                return;
            }
        };
        if !sent {
            tracing::warn!("timer executor is gone, ticking in the foreground");
            *self = Self::foreground(period_ms);
            self.start(state, now_ms, period_ms);
        }
    }

    fn stop(&mut self) {
        match self {
            Scheduler::Background(executor) => {
                executor.send(ExecutorCommand::Stop);
            }
            Scheduler::Foreground { last_tick_ms, .. } => *last_tick_ms = None,
        }
    }

    fn sync(&mut self, state: &TimerState, now_ms: i64) {
        match self {
            Scheduler::Background(executor) => {
                if let Some(start_reference_ms) = state.start_reference_ms {
                    executor.send(ExecutorCommand::Sync {
                        run_id: state.run_id,
                        start_reference_ms,
                    });
                }
            }
            Scheduler::Foreground { last_tick_ms, .. } => *last_tick_ms = Some(now_ms),
        }
    }

    /// Take every executor event already queued. Empty in the foreground.
    fn drain(&mut self) -> Vec<ExecutorEvent> {
        let mut pending = Vec::new();
        if let Scheduler::Background(executor) = self {
            while let Some(event) = executor.try_recv() {
                pending.push(event);
            }
        }
        pending
    }

    /// Foreground only: whether a tick is due at `now_ms`, marking it taken.
    fn take_foreground_tick(&mut self, now_ms: i64) -> bool {
        match self {
            Scheduler::Foreground {
                period_ms,
                last_tick_ms,
            } => {
                let due = match *last_tick_ms {
                    Some(last) => now_ms.saturating_sub(last) >= *period_ms,
                    None => true,
                };
                if due {
                    // Stay on the period grid so a late poll does not delay the next tick.
                    let next = match *last_tick_ms {
                        Some(last) => last + (now_ms - last) / *period_ms * *period_ms,
                        None => now_ms,
                    };
                    *last_tick_ms = Some(next);
                }
                due
            }
            Scheduler::Background(_) => false,
        }
    }
}

/// Study timer engine.
///
/// Owns the timer state, the session recorder and (when available) the
/// background executor, which is torn down with the engine.
pub struct TimerEngine<S> {
    state: TimerState,
    recorder: SessionRecorder<S>,
    clock: Arc<dyn Clock>,
    scheduler: Scheduler,
    tick_interval_ms: u64,
}

impl<S: PersistenceAdapter> TimerEngine<S> {
    /// Create an idle engine using the configured mode and pomodoro length.
    pub fn new(store: S, clock: Arc<dyn Clock>, config: &TimerConfig) -> Self {
        let state = TimerState::new(config.mode, config.target_duration_secs());
        Self::with_state(state, store, clock, config)
    }

    /// Rebuild an engine from a previously persisted state.
    ///
    /// A running state keeps its start reference, so time that passed while
    /// nothing was ticking is picked up by the next [`resync`](Self::resync).
    pub fn restore(
        mut state: TimerState,
        store: S,
        clock: Arc<dyn Clock>,
        config: &TimerConfig,
    ) -> Self {
        if state.running && state.start_reference_ms.is_none() {
            tracing::warn!("restored running timer without start reference, resetting");
            state.reinitialize();
        }
        let mut engine = Self::with_state(state, store, clock, config);
        if engine.state.running {
            let now = engine.clock.now_ms();
            engine
                .scheduler
                .start(&engine.state, now, engine.tick_interval_ms);
        }
        engine
    }

    fn with_state(state: TimerState, store: S, clock: Arc<dyn Clock>, config: &TimerConfig) -> Self {
        let scheduler = Scheduler::new(&clock, config);
        Self {
            state,
            recorder: SessionRecorder::new(store, clock.clone()),
            clock,
            scheduler,
            tick_interval_ms: config.tick_interval_ms,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Elapsed (stopwatch) or remaining (pomodoro) seconds as of the last
    /// tick or resync.
    pub fn display_secs(&self) -> u64 {
        self.state.display_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn target_duration_secs(&self) -> u64 {
        self.state.target_duration_secs
    }

    pub fn selected_subject_id(&self) -> &str {
        &self.state.selected_subject_id
    }

    /// Whether ticks come from the background executor.
    pub fn is_background(&self) -> bool {
        matches!(self.scheduler, Scheduler::Background(_))
    }

    pub fn recorder(&self) -> &SessionRecorder<S> {
        &self.recorder
    }

    pub fn store(&self) -> &S {
        self.recorder.store()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.state.mode,
            running: self.state.running,
            display_secs: self.state.display_secs,
            display: format_clock(self.state.display_secs),
            target_duration_secs: self.state.target_duration_secs,
            selected_subject_id: self.state.selected_subject_id.clone(),
            background: self.is_background(),
            at: self.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or continue counting. No-op while running.
    ///
    /// A pomodoro that already ran down to zero starts a fresh run from the
    /// full target.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        if self.state.mode == TimerMode::Pomodoro && self.state.display_secs == 0 {
            self.state.display_secs = self.state.target_duration_secs;
        }

        let now = self.clock.now_ms();
        self.state.start_reference_ms = Some(start_reference_for(now, self.state.consumed_secs()));
        self.state.running = true;
        self.state.run_id = self.state.run_id.wrapping_add(1);
        self.scheduler.start(&self.state, now, self.tick_interval_ms);
        tracing::debug!(
            mode = %self.state.mode,
            run_id = self.state.run_id,
            display_secs = self.state.display_secs,
            "timer started"
        );

        Some(Event::TimerStarted {
            mode: self.state.mode,
            display_secs: self.state.display_secs,
            run_id: self.state.run_id,
            at: self.now(),
        })
    }

    /// Stop counting and keep progress. Never records a session.
    ///
    /// If the countdown already reached zero the run completes instead.
    pub fn pause(&mut self) -> Result<Option<Event>> {
        if !self.state.running {
            return Ok(None);
        }
        if let Some(completed) = self.recompute(self.clock.now_ms())? {
            return Ok(Some(completed));
        }

        self.state.running = false;
        self.state.start_reference_ms = None;
        self.scheduler.stop();
        tracing::debug!(display_secs = self.state.display_secs, "timer paused");

        Ok(Some(Event::TimerPaused {
            display_secs: self.state.display_secs,
            at: self.now(),
        }))
    }

    /// Stop and reinitialize the display. A running timer first records the
    /// time spent so far.
    ///
    /// # Errors
    /// Propagates persistence failures. The timer is reset regardless.
    pub fn reset(&mut self) -> Result<Option<Event>> {
        let mut consumed = 0;
        let mut completed = None;
        if self.state.running {
            match self.recompute(self.clock.now_ms())? {
                Some(event) => completed = event.recorded_session().cloned(),
                None => consumed = self.state.consumed_secs(),
            }
        }

        let subject_id = self.state.selected_subject_id.clone();
        self.state.reinitialize();
        self.scheduler.stop();

        let session = match completed {
            Some(session) => Some(session),
            None => self.recorder.record(consumed, &subject_id)?,
        };
        tracing::debug!(recorded = session.is_some(), "timer reset");

        Ok(Some(Event::TimerReset {
            session,
            at: self.now(),
        }))
    }

    /// Stopwatch only: record the elapsed time, then clear and stop.
    ///
    /// No-op in pomodoro mode or when nothing has elapsed.
    ///
    /// # Errors
    /// Propagates persistence failures. The timer is cleared regardless.
    pub fn save_and_reset(&mut self) -> Result<Option<Event>> {
        if self.state.mode != TimerMode::Stopwatch {
            return Ok(None);
        }
        if self.state.running {
            self.recompute(self.clock.now_ms())?;
        }
        let elapsed = self.state.display_secs;
        if elapsed == 0 {
            return Ok(None);
        }

        let subject_id = self.state.selected_subject_id.clone();
        self.state.reinitialize();
        self.scheduler.stop();
        let session = self.recorder.record(elapsed, &subject_id)?;

        Ok(Some(Event::SessionSaved {
            session,
            at: self.now(),
        }))
    }

    /// Recompute displayed time from the start reference at the current
    /// wall-clock time.
    pub fn resync(&mut self) -> Result<Option<Event>> {
        self.resync_at(self.clock.now_ms())
    }

    /// Recompute displayed time as of `now_ms`, bypassing tick history.
    ///
    /// Ticks the executor queued before this call are older than the result
    /// and are discarded. Completes a pomodoro whose remaining time reached
    /// zero; once completed, further calls are no-ops.
    pub fn resync_at(&mut self, now_ms: i64) -> Result<Option<Event>> {
        if !self.state.running {
            return Ok(None);
        }
        let run_id = self.state.run_id;
        let executor_completed = self
            .scheduler
            .drain()
            .into_iter()
            .any(|pending| pending == ExecutorEvent::Completed { run_id });
        if executor_completed {
            return self.complete().map(Some);
        }
        if let Some(completed) = self.recompute(now_ms)? {
            return Ok(Some(completed));
        }
        self.scheduler.sync(&self.state, now_ms);
        Ok(Some(Event::Tick {
            display_secs: self.state.display_secs,
        }))
    }

    pub fn set_mode(&mut self, mode: TimerMode) -> Option<Event> {
        if self.state.mode == mode {
            return None;
        }
        self.state.mode = mode;
        Some(self.on_mode_or_duration_change())
    }

    pub fn set_target_minutes(&mut self, minutes: u64) -> Option<Event> {
        self.set_target_duration_secs(minutes.saturating_mul(60))
    }

    pub fn set_target_duration_secs(&mut self, secs: u64) -> Option<Event> {
        if self.state.target_duration_secs == secs {
            return None;
        }
        self.state.target_duration_secs = secs;
        Some(self.on_mode_or_duration_change())
    }

    /// Discard the current run without saving and reinitialize the display.
    pub fn on_mode_or_duration_change(&mut self) -> Event {
        if self.state.running {
            self.scheduler.stop();
            tracing::debug!("configuration changed while running, progress discarded");
        }
        self.state.reinitialize();
        Event::ConfigurationChanged {
            mode: self.state.mode,
            target_duration_secs: self.state.target_duration_secs,
            at: self.now(),
        }
    }

    /// Attribute subsequent sessions to `subject_id`.
    pub fn select_subject(&mut self, subject_id: impl Into<String>) {
        self.state.selected_subject_id = subject_id.into();
    }

    // ── Tick intake ──────────────────────────────────────────────────

    /// Apply whatever ticks are ready without blocking.
    ///
    /// Drains the background executor in emission order, or in foreground
    /// mode recomputes once per tick period.
    pub fn pump(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        if self.is_background() {
            loop {
                let next = match &mut self.scheduler {
                    Scheduler::Background(executor) => executor.try_recv(),
                    Scheduler::Foreground { .. } => None,
                };
                let Some(executor_event) = next else { break };
                if let Some(event) = self.apply_executor_event(executor_event)? {
                    events.push(event);
                }
            }
            return Ok(events);
        }

        if self.state.running {
            let now = self.clock.now_ms();
            if self.scheduler.take_foreground_tick(now) {
                match self.recompute(now)? {
                    Some(completed) => events.push(completed),
                    None => events.push(Event::Tick {
                        display_secs: self.state.display_secs,
                    }),
                }
            }
        }
        Ok(events)
    }

    /// Wait for the next background event that changes the timer.
    ///
    /// Returns `Ok(None)` straight away in foreground mode, or once the
    /// executor has gone away.
    pub async fn recv(&mut self) -> Result<Option<Event>> {
        loop {
            let next = match &mut self.scheduler {
                Scheduler::Background(executor) => executor.recv().await,
                Scheduler::Foreground { .. } => return Ok(None),
            };
            let Some(executor_event) = next else {
                return Ok(None);
            };
            if let Some(event) = self.apply_executor_event(executor_event)? {
                return Ok(Some(event));
            }
        }
    }

    /// Apply one executor event. Events of another run, or arriving after
    /// the timer stopped locally, are dropped.
    pub fn apply_executor_event(&mut self, event: ExecutorEvent) -> Result<Option<Event>> {
        let run_id = match event {
            ExecutorEvent::Tick { run_id, .. } | ExecutorEvent::Completed { run_id } => run_id,
        };
        if !self.state.running || run_id != self.state.run_id {
            tracing::debug!(?event, current_run = self.state.run_id, "ignoring stale executor event");
            return Ok(None);
        }

        match event {
            ExecutorEvent::Tick { seconds, .. } => {
                if self.state.mode == TimerMode::Pomodoro && seconds == 0 {
                    return self.complete().map(Some);
                }
                self.state.display_secs = seconds;
                Ok(Some(Event::Tick {
                    display_secs: seconds,
                }))
            }
            ExecutorEvent::Completed { .. } => self.complete().map(Some),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Refresh `display_secs` from the start reference. Returns the
    /// completion event if this finished a pomodoro.
    fn recompute(&mut self, now_ms: i64) -> Result<Option<Event>> {
        let Some(display) = self.state.display_at(now_ms) else {
            return Ok(None);
        };
        if self.state.mode == TimerMode::Pomodoro && display == 0 {
            return self.complete().map(Some);
        }
        self.state.display_secs = display;
        Ok(None)
    }

    /// Terminal transition of a pomodoro run. The state is settled before
    /// recording so a persistence failure cannot cause a second record.
    fn complete(&mut self) -> Result<Event> {
        let target = self.state.target_duration_secs;
        let subject_id = self.state.selected_subject_id.clone();
        self.state.running = false;
        self.state.start_reference_ms = None;
        self.state.display_secs = 0;
        self.scheduler.stop();
        tracing::info!(target_secs = target, run_id = self.state.run_id, "pomodoro completed");

        let session = self.recorder.record(target, &subject_id)?;
        Ok(Event::TimerCompleted {
            target_duration_secs: target,
            session,
            at: self.now(),
        })
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::{MemoryStore, SESSIONS_KEY};

    fn engine(mode: TimerMode) -> (TimerEngine<Arc<MemoryStore>>, Arc<MemoryStore>, ManualClock) {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(1_700_000_000_000);
        let config = TimerConfig {
            mode,
            pomodoro_minutes: 15,
            ..TimerConfig::default()
        };
        let engine = TimerEngine::new(store.clone(), Arc::new(clock.clone()), &config);
        (engine, store, clock)
    }

    #[test]
    fn falls_back_to_foreground_without_runtime() {
        let (engine, _, _) = engine(TimerMode::Stopwatch);
        assert!(!engine.is_background());
    }

    #[test]
    fn start_twice_is_noop() {
        let (mut engine, _, _) = engine(TimerMode::Stopwatch);
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert_eq!(engine.state().run_id, 1);
    }

    #[test]
    fn pause_when_idle_is_noop() {
        let (mut engine, _, _) = engine(TimerMode::Stopwatch);
        assert_eq!(engine.pause().unwrap(), None);
    }

    #[test]
    fn pause_captures_elapsed_and_resume_continues() {
        let (mut engine, store, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        clock.advance_ms(10_400);
        engine.pause().unwrap();
        assert_eq!(engine.display_secs(), 10);
        assert!(!engine.is_running());

        clock.advance_secs(300);
        engine.start();
        clock.advance_secs(5);
        engine.resync().unwrap();
        assert_eq!(engine.display_secs(), 15);
        assert_eq!(store.list_len(SESSIONS_KEY), 0);
    }

    #[test]
    fn pomodoro_counts_down() {
        let (mut engine, _, clock) = engine(TimerMode::Pomodoro);
        assert_eq!(engine.display_secs(), 900);
        engine.start();
        clock.advance_secs(100);
        let event = engine.resync().unwrap();
        assert_eq!(event, Some(Event::Tick { display_secs: 800 }));
    }

    #[test]
    fn pomodoro_reset_records_consumed_time() {
        let (mut engine, _, clock) = engine(TimerMode::Pomodoro);
        engine.start();
        clock.advance_secs(300);
        let event = engine.reset().unwrap().unwrap();
        assert_eq!(event.recorded_session().unwrap().duration_seconds, 300);
        assert_eq!(engine.display_secs(), 900);
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_when_paused_does_not_record() {
        let (mut engine, store, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        clock.advance_secs(30);
        engine.pause().unwrap();
        engine.reset().unwrap();
        assert_eq!(store.list_len(SESSIONS_KEY), 0);
        assert_eq!(engine.display_secs(), 0);
    }

    #[test]
    fn save_and_reset_is_stopwatch_only() {
        let (mut engine, store, clock) = engine(TimerMode::Pomodoro);
        engine.start();
        clock.advance_secs(30);
        assert_eq!(engine.save_and_reset().unwrap(), None);
        assert!(engine.is_running());
        assert_eq!(store.list_len(SESSIONS_KEY), 0);
    }

    #[test]
    fn save_and_reset_works_while_paused() {
        let (mut engine, store, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        clock.advance_secs(42);
        engine.pause().unwrap();
        let event = engine.save_and_reset().unwrap().unwrap();
        assert_eq!(event.recorded_session().unwrap().duration_seconds, 42);
        assert_eq!(engine.display_secs(), 0);
        assert_eq!(store.list_len(SESSIONS_KEY), 1);
    }

    #[test]
    fn changing_duration_discards_progress() {
        let (mut engine, store, clock) = engine(TimerMode::Pomodoro);
        engine.start();
        clock.advance_secs(60);
        assert!(engine.set_target_minutes(25).is_some());
        assert!(!engine.is_running());
        assert_eq!(engine.display_secs(), 1500);
        assert!(engine.set_target_minutes(25).is_none());
        assert_eq!(store.list_len(SESSIONS_KEY), 0);
    }

    #[test]
    fn foreground_pump_ticks_once_per_period() {
        let (mut engine, _, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        assert!(engine.pump().unwrap().is_empty());
        clock.advance_ms(999);
        assert!(engine.pump().unwrap().is_empty());
        clock.advance_ms(1);
        assert_eq!(engine.pump().unwrap(), vec![Event::Tick { display_secs: 1 }]);
        assert!(engine.pump().unwrap().is_empty());
    }

    #[test]
    fn foreground_pump_keeps_period_after_late_poll() {
        let (mut engine, _, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        clock.set_ms(1_300);
        assert_eq!(engine.pump().unwrap(), vec![Event::Tick { display_secs: 1 }]);
        clock.set_ms(2_050);
        assert_eq!(engine.pump().unwrap(), vec![Event::Tick { display_secs: 2 }]);
    }

    #[test]
    fn foreground_pump_completes_pomodoro() {
        let (mut engine, store, clock) = engine(TimerMode::Pomodoro);
        engine.start();
        clock.advance_secs(2000);
        let events = engine.pump().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::TimerCompleted { target_duration_secs: 900, .. }));
        assert!(engine.pump().unwrap().is_empty());
        assert_eq!(store.list_len(SESSIONS_KEY), 1);
    }

    #[test]
    fn stale_executor_events_are_ignored() {
        let (mut engine, _, _) = engine(TimerMode::Pomodoro);
        engine.start();
        let stale = ExecutorEvent::Completed { run_id: 99 };
        assert_eq!(engine.apply_executor_event(stale).unwrap(), None);
        assert!(engine.is_running());

        engine.pause().unwrap();
        let late = ExecutorEvent::Tick { run_id: 1, seconds: 3 };
        assert_eq!(engine.apply_executor_event(late).unwrap(), None);
        assert_eq!(engine.display_secs(), 900);
    }

    #[test]
    fn completed_pomodoro_restarts_full_length() {
        let (mut engine, _, clock) = engine(TimerMode::Pomodoro);
        engine.start();
        clock.advance_secs(900);
        engine.resync().unwrap();
        assert_eq!(engine.display_secs(), 0);

        engine.start();
        assert_eq!(engine.display_secs(), 900);
        assert_eq!(engine.state().run_id, 2);
    }

    #[test]
    fn restore_picks_up_time_passed_while_away() {
        let (mut engine, store, clock) = engine(TimerMode::Stopwatch);
        engine.start();
        clock.advance_secs(20);
        let saved = engine.state().clone();
        drop(engine);

        clock.advance_secs(100);
        let mut restored = TimerEngine::restore(
            saved,
            store.clone(),
            Arc::new(clock.clone()),
            &TimerConfig::default(),
        );
        restored.resync().unwrap();
        assert_eq!(restored.display_secs(), 120);
        assert!(restored.is_running());
    }

    #[test]
    fn snapshot_formats_display() {
        let (engine, _, _) = engine(TimerMode::Pomodoro);
        match engine.snapshot() {
            Event::StateSnapshot { display, running, .. } => {
                assert_eq!(display, "00:15:00");
                assert!(!running);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
