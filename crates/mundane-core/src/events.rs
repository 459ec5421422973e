use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::SessionPhase;

/// Every state change of a workout session produces an Event.
/// Front-ends print or log them; they carry no control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    SessionStarted {
        session_id: Uuid,
        protocol: String,
        exercise_count: usize,
        /// `Prep { index: 0 }`, or `Complete` for an empty queue.
        first_phase: SessionPhase,
        at: DateTime<Utc>,
    },
    PhaseEntered {
        session_id: Uuid,
        phase: SessionPhase,
        exercise_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: Uuid,
        exercises_done: usize,
        at: DateTime<Utc>,
    },
    SessionReset {
        /// `None` when the session was already idle.
        session_id: Option<Uuid>,
        at: DateTime<Utc>,
    },
}

impl SessionEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SessionStarted { at, .. }
            | SessionEvent::PhaseEntered { at, .. }
            | SessionEvent::SessionCompleted { at, .. }
            | SessionEvent::SessionReset { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = SessionEvent::PhaseEntered {
            session_id: Uuid::nil(),
            phase: SessionPhase::Work { index: 1 },
            exercise_id: "flyes_flat".into(),
            duration_secs: 45,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PhaseEntered");
        assert_eq!(json["phase"]["phase"], "work");
        assert_eq!(json["phase"]["index"], 1);
        assert_eq!(json["duration_secs"], 45);
    }
}
