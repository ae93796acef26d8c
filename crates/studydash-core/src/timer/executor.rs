//! Background tick source.
//!
//! The executor is a tokio task that keeps ticking while the host is busy or
//! suspended. It holds a copy of the run's start reference and recomputes
//! the displayed seconds from the wall clock on every tick, so a delayed or
//! skipped tick never accumulates error.
//!
//! ```text
//! host --Start/Stop/Sync--> executor task --Tick/Completed--> host
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::state::{display_for, elapsed_secs, TimerMode};
use crate::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorCommand {
    Start {
        run_id: u64,
        start_reference_ms: i64,
        mode: TimerMode,
        target_secs: u64,
    },
    Stop,
    /// Replace the run's start reference with the host's authoritative one.
    Sync {
        run_id: u64,
        start_reference_ms: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorEvent {
    Tick { run_id: u64, seconds: u64 },
    /// Pomodoro reached zero. Always the last event of its run.
    Completed { run_id: u64 },
}

#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    run_id: u64,
    start_reference_ms: i64,
    mode: TimerMode,
    target_secs: u64,
}

impl ActiveRun {
    fn seconds_at(&self, now_ms: i64) -> u64 {
        display_for(
            self.mode,
            self.target_secs,
            elapsed_secs(self.start_reference_ms, now_ms),
        )
    }
}

/// Handle to a running executor task. Dropping it aborts the task.
pub struct BackgroundExecutor {
    commands: mpsc::UnboundedSender<ExecutorCommand>,
    events: mpsc::UnboundedReceiver<ExecutorEvent>,
    task: JoinHandle<()>,
}

impl BackgroundExecutor {
    /// Spawn on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime; callers fall back to
    /// foreground ticking.
    pub fn spawn(clock: Arc<dyn Clock>, period: Duration) -> Option<Self> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = handle.spawn(run(clock, period, command_rx, event_tx));
        Some(Self {
            commands: command_tx,
            events: event_rx,
            task,
        })
    }

    /// Returns `false` if the task is gone.
    pub fn send(&self, command: ExecutorCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn try_recv(&mut self) -> Option<ExecutorEvent> {
        self.events.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<ExecutorEvent> {
        self.events.recv().await
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    clock: Arc<dyn Clock>,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<ExecutorCommand>,
    events: mpsc::UnboundedSender<ExecutorEvent>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut active: Option<ActiveRun> = None;

    loop {
        tokio::select! {
            // Commands first: a Stop queued behind a due tick must win.
            biased;

            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    ExecutorCommand::Start { run_id, start_reference_ms, mode, target_secs } => {
                        active = Some(ActiveRun { run_id, start_reference_ms, mode, target_secs });
                        interval.reset();
                    }
                    ExecutorCommand::Stop => active = None,
                    ExecutorCommand::Sync { run_id, start_reference_ms } => {
                        match active.as_mut() {
                            Some(run) if run.run_id == run_id => {
                                run.start_reference_ms = start_reference_ms;
                            }
                            _ => tracing::debug!(run_id, "sync for inactive run ignored"),
                        }
                    }
                }
            }
            _ = interval.tick(), if active.is_some() => {
                let Some(run) = active else { continue };
                let seconds = run.seconds_at(clock.now_ms());
                if events.send(ExecutorEvent::Tick { run_id: run.run_id, seconds }).is_err() {
                    break;
                }
                if run.mode == TimerMode::Pomodoro && seconds == 0 {
                    active = None;
                    if events.send(ExecutorEvent::Completed { run_id: run.run_id }).is_err() {
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!("timer executor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn spawn(clock: &ManualClock) -> BackgroundExecutor {
        BackgroundExecutor::spawn(Arc::new(clock.clone()), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn unavailable_outside_runtime() {
        let clock = ManualClock::new(0);
        assert!(BackgroundExecutor::spawn(Arc::new(clock), Duration::from_secs(1)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_recompute_from_wall_clock() {
        let clock = ManualClock::new(0);
        let mut executor = spawn(&clock);
        executor.send(ExecutorCommand::Start {
            run_id: 1,
            start_reference_ms: 0,
            mode: TimerMode::Stopwatch,
            target_secs: 0,
        });

        // A long suspension shows up as one large jump, not missed counts.
        clock.set_ms(42_500);
        assert_eq!(
            executor.recv().await,
            Some(ExecutorEvent::Tick { run_id: 1, seconds: 42 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pomodoro_completes_once_then_goes_quiet() {
        let clock = ManualClock::new(0);
        let mut executor = spawn(&clock);
        executor.send(ExecutorCommand::Start {
            run_id: 7,
            start_reference_ms: 0,
            mode: TimerMode::Pomodoro,
            target_secs: 10,
        });
        clock.set_ms(12_000);

        assert_eq!(
            executor.recv().await,
            Some(ExecutorEvent::Tick { run_id: 7, seconds: 0 })
        );
        assert_eq!(
            executor.recv().await,
            Some(ExecutorEvent::Completed { run_id: 7 })
        );
        let quiet = time::timeout(Duration::from_secs(10), executor.recv()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_schedule() {
        let clock = ManualClock::new(0);
        let mut executor = spawn(&clock);
        executor.send(ExecutorCommand::Start {
            run_id: 1,
            start_reference_ms: 0,
            mode: TimerMode::Stopwatch,
            target_secs: 0,
        });
        executor.send(ExecutorCommand::Stop);

        let quiet = time::timeout(Duration::from_secs(5), executor.recv()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_realigns_reference() {
        let clock = ManualClock::new(10_000);
        let mut executor = spawn(&clock);
        executor.send(ExecutorCommand::Start {
            run_id: 2,
            start_reference_ms: 0,
            mode: TimerMode::Pomodoro,
            target_secs: 100,
        });
        // Host resynced: 5 s consumed as of 10 s on the wall clock.
        executor.send(ExecutorCommand::Sync {
            run_id: 2,
            start_reference_ms: 5_000,
        });

        assert_eq!(
            executor.recv().await,
            Some(ExecutorEvent::Tick { run_id: 2, seconds: 95 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sync_for_other_run_is_ignored() {
        let clock = ManualClock::new(10_000);
        let mut executor = spawn(&clock);
        executor.send(ExecutorCommand::Start {
            run_id: 3,
            start_reference_ms: 0,
            mode: TimerMode::Stopwatch,
            target_secs: 0,
        });
        executor.send(ExecutorCommand::Sync {
            run_id: 2,
            start_reference_ms: 9_000,
        });

        assert_eq!(
            executor.recv().await,
            Some(ExecutorEvent::Tick { run_id: 3, seconds: 10 })
        );
    }
}
