//! # Mundane Core Library
//!
//! This library provides the core logic for the Mundane guided-workout
//! timer. Every operation is available through the standalone CLI; any
//! other front-end is a thin rendering layer implementing
//! [`NotificationSink`].
//!
//! ## Architecture
//!
//! - **Catalog**: the static exercise library, protocol table and weekly
//!   schedule, validated when loaded
//! - **Planner**: resolves a weekday into an ordered workout queue
//! - **Interval Timer**: a clockless one-second countdown
//! - **Session**: the prep/work state machine over one workout queue
//! - **Runner**: a tokio task that ticks a session once per second
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`WorkoutSession`]: Core session state machine
//! - [`SessionRunner`]: Real-time driver
//! - [`WorkoutData`]: Workout document
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod error;
pub mod events;
pub mod planner;
pub mod runner;
pub mod session;
pub mod sink;
pub mod storage;
pub mod timer;

pub use catalog::{Catalog, ExerciseRecord, ProtocolTable, Schedule, WorkoutData};
pub use error::{ConfigError, CoreError, SessionError, SinkError, TimerError};
pub use events::SessionEvent;
pub use planner::{resolve_today_queue, today_weekday, weekday_name, WorkoutQueue, COOL_DOWN_LABEL};
pub use runner::{SessionHandle, SessionRunner};
pub use session::{SessionPhase, SessionSnapshot, SessionTiming, WorkoutSession};
pub use sink::{Notification, NotificationSink, NullSink, RecordingSink};
pub use storage::Config;
pub use timer::{IntervalTimer, Tick};
