use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ExerciseRecord;
use crate::error::TimerError;
use crate::timer::IntervalTimer;

pub const DEFAULT_PREP_SECS: u32 = 5;
pub const DEFAULT_WORK_SECS: u32 = 45;

/// Where a session is. `Idle` is initial, `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Prep { index: usize },
    Work { index: usize },
    Complete,
}

impl SessionPhase {
    /// Prep or Work: a countdown is live.
    pub fn is_running(&self) -> bool {
        matches!(self, SessionPhase::Prep { .. } | SessionPhase::Work { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            SessionPhase::Prep { index } | SessionPhase::Work { index } => Some(*index),
            SessionPhase::Idle | SessionPhase::Complete => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Prep { .. } => "prep",
            SessionPhase::Work { .. } => "work",
            SessionPhase::Complete => "complete",
        }
    }
}

/// Prep and work durations. Both are at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    prep: NonZeroU32,
    work: NonZeroU32,
}

impl SessionTiming {
    /// # Errors
    ///
    /// Returns `ZeroDuration` if either duration is zero.
    pub fn new(prep_secs: u32, work_secs: u32) -> Result<Self, TimerError> {
        Ok(Self {
            prep: NonZeroU32::new(prep_secs).ok_or(TimerError::ZeroDuration)?,
            work: NonZeroU32::new(work_secs).ok_or(TimerError::ZeroDuration)?,
        })
    }

    pub fn prep(&self) -> NonZeroU32 {
        self.prep
    }

    pub fn work(&self) -> NonZeroU32 {
        self.work
    }

    /// Prep plus work seconds for one exercise.
    pub fn per_exercise_secs(&self) -> u64 {
        u64::from(self.prep.get()) + u64::from(self.work.get())
    }
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            prep: NonZeroU32::new(DEFAULT_PREP_SECS).unwrap_or(NonZeroU32::MIN),
            work: NonZeroU32::new(DEFAULT_WORK_SECS).unwrap_or(NonZeroU32::MIN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivePhase {
    Prep,
    Work,
    Complete,
}

/// Runtime state of a started session. Absent while idle.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub index: usize,
    pub phase: ActivePhase,
    pub timer: IntervalTimer,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            index: 0,
            phase: ActivePhase::Prep,
            timer: IntervalTimer::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            ActivePhase::Prep => SessionPhase::Prep { index: self.index },
            ActivePhase::Work => SessionPhase::Work { index: self.index },
            ActivePhase::Complete => SessionPhase::Complete,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining_secs().unwrap_or(0)
    }
}

/// Serializable view of a session for front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Option<Uuid>,
    pub phase: SessionPhase,
    pub protocol: String,
    pub exercise_count: usize,
    pub exercise: Option<ExerciseRecord>,
    pub next_label: Option<String>,
    pub remaining_secs: u32,
    pub total_secs: u32,
    /// 0.0 .. 1.0 within the current phase.
    pub phase_progress: f64,
    /// 0.0 .. 100.0 across the whole workout.
    pub workout_progress_pct: f64,
    pub started_at: Option<DateTime<Utc>>,
    pub at: DateTime<Utc>,
}
