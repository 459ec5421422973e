//! Static workout data: exercise library, protocols and the weekly schedule.
//!
//! The three tables are loaded once from a JSON document and never mutated.
//! Cross references are checked at load time so a dangling protocol or
//! exercise id is reported before any session starts.

mod exercise;
mod tables;

pub use exercise::{Catalog, ExerciseRecord, SETTING_NOT_APPLICABLE};
pub use tables::{ProtocolTable, Schedule, DAYS_PER_WEEK};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::planner::{resolve_today_queue, WorkoutQueue};

const BUILTIN_WORKOUTS: &str = include_str!("../../data/workouts.json");

/// The full workout document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutData {
    pub schedule: Schedule,
    pub protocols: ProtocolTable,
    pub library: Catalog,
}

impl WorkoutData {
    /// The push/pull/legs/recovery week bundled with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_WORKOUTS)
    }

    /// Parse and validate a JSON workout document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let data: WorkoutData =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    /// Read, parse and validate a JSON workout document from disk.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailed` if the file cannot be read, otherwise whatever
    /// [`WorkoutData::from_json_str`] reports.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let data = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            exercises = data.library.len(),
            "loaded workout data"
        );
        Ok(data)
    }

    /// Check every schedule -> protocol and protocol -> exercise reference.
    ///
    /// Weekdays are checked in order, then protocols by name, so the first
    /// error reported is stable for a given document.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (_, protocol) in self.schedule.iter() {
            if !self.protocols.contains(protocol) {
                return Err(ConfigError::UnknownProtocol {
                    protocol: protocol.to_string(),
                });
            }
        }

        for (protocol, ids) in self.protocols.iter() {
            if let Some(missing) = ids.iter().find(|id| !self.library.contains(id)) {
                return Err(ConfigError::UnknownExercise {
                    protocol: protocol.to_string(),
                    exercise: missing.clone(),
                });
            }
        }

        Ok(())
    }

    /// Resolve the workout queue for a weekday index (0 = Sunday).
    pub fn plan_for(&self, weekday: u8) -> Result<WorkoutQueue, ConfigError> {
        resolve_today_queue(weekday, &self.schedule, &self.protocols, &self.library)
    }
}
