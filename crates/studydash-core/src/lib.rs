//! # studydash Core Library
//!
//! Business logic behind the study timer of the studydash dashboard. The
//! `studydash` CLI is a thin host over this crate; any other front end
//! (desktop, web bridge) drives the same [`TimerEngine`].
//!
//! ## Architecture
//!
//! - **Timer Engine**: derives displayed time from a single start reference
//!   and the wall clock, so suspension and reloads never lose time
//! - **Background Executor**: a tokio task emitting ticks over a channel,
//!   with foreground ticking as the fallback when no runtime exists
//! - **Session Recorder**: turns finished intervals into study sessions
//! - **Storage**: list-oriented persistence (in-memory or SQLite) and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionRecorder`]: Study session persistence
//! - [`PersistenceAdapter`]: Storage contract, implemented by [`MemoryStore`]
//!   and [`Database`]
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod recorder;
pub mod stats;
pub mod storage;
pub mod subjects;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use recorder::{SessionRecorder, StudySession};
pub use stats::{format_clock, format_total, DailyTotal, StudyStats};
pub use storage::{Config, Database, MemoryStore, PersistenceAdapter, TimerConfig};
pub use subjects::Subject;
pub use timer::{TimerEngine, TimerMode, TimerState};
