//! Core error types for mundane-core.
//!
//! Configuration problems are detected at planning time and abort a session
//! before it starts. Timer misuse is an internal invariant violation and is
//! only ever raised by defensive checks.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mundane-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration or workout-data errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Countdown errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The schedule has no entry for the requested weekday
    #[error("No protocol scheduled for weekday {weekday}")]
    UnknownWeekday { weekday: u8 },

    /// The schedule names a protocol that is not defined
    #[error("Protocol '{protocol}' is not defined")]
    UnknownProtocol { protocol: String },

    /// A protocol references an exercise that is not in the library
    #[error("Protocol '{protocol}' references unknown exercise '{exercise}'")]
    UnknownExercise { protocol: String, exercise: String },

    /// Schedule key is not a weekday index between 0 and 6
    #[error("Invalid schedule key '{0}': expected a weekday index 0-6")]
    InvalidWeekdayKey(String),

    /// Failed to load configuration or workout data
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse a document
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Unknown dot-path configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Interval timer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Countdown duration must be at least one second")]
    ZeroDuration,

    /// A countdown was started while another one was still live.
    #[error("Countdown started while another is active (phase {phase})")]
    Misuse { phase: String },
}

/// Session lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session already started; reset it first")]
    AlreadyStarted,

    #[error("Session runner has stopped")]
    RunnerStopped,
}

/// Notification sink errors. Never fatal to the session.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Notification sink unavailable: {0}")]
    Unavailable(String),

    #[error("Notification sink IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
