//! Workout session state machine.
//!
//! The session walks the workout queue one exercise at a time:
//!
//! ```text
//! Idle -> Prep(0) -> Work(0) -> Prep(1) -> ... -> Work(n-1) -> Complete
//! ```
//!
//! Like the interval timer it owns, the session has no clock. The caller
//! (normally [`crate::runner::SessionRunner`]) invokes `tick()` once per
//! second; phase changes happen inside `tick()` when the live countdown
//! reaches zero.
//!
//! Every transition pushes exactly one display update and then exactly one
//! announcement to the sink. Sink failures are logged and never stop the
//! countdown.

mod state;

pub use state::{
    SessionPhase, SessionSnapshot, SessionTiming, DEFAULT_PREP_SECS, DEFAULT_WORK_SECS,
};

use std::num::NonZeroU32;

use chrono::Utc;

use crate::error::{SessionError, SinkError, TimerError};
use crate::events::SessionEvent;
use crate::planner::WorkoutQueue;
use crate::sink::NotificationSink;
use crate::timer::progress_fraction;
use state::{ActivePhase, SessionState};

pub const BEGIN_CUE: &str = "Begin.";
pub const REST_CUE: &str = "Rest.";
pub const COMPLETE_ANNOUNCEMENT: &str = "Workout complete. Great job.";

/// `"Next up. Incline DB Press. Focus on upper chest squeeze."`
pub fn next_up_announcement(name: &str, detail: &str) -> String {
    format!("Next up. {name}. {detail}")
}

/// Drives one workout queue through prep/work phases.
pub struct WorkoutSession<S> {
    queue: WorkoutQueue,
    timing: SessionTiming,
    sink: S,
    state: Option<SessionState>,
}

impl<S: NotificationSink> WorkoutSession<S> {
    pub fn new(queue: WorkoutQueue, timing: SessionTiming, sink: S) -> Self {
        Self {
            queue,
            timing,
            sink,
            state: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.state
            .as_ref()
            .map(SessionState::phase)
            .unwrap_or(SessionPhase::Idle)
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_running()
    }

    pub fn has_active_timer(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.timer.is_active())
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.as_ref().map(SessionState::remaining_secs).unwrap_or(0)
    }

    pub fn queue(&self) -> &WorkoutQueue {
        &self.queue
    }

    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// 0.0 .. 100.0 progress across the entire workout.
    pub fn workout_progress_pct(&self) -> f64 {
        let Some(state) = self.state.as_ref() else {
            return 0.0;
        };
        let per_exercise = self.timing.per_exercise_secs();
        let total = per_exercise * self.queue.len() as u64;
        if state.phase == ActivePhase::Complete || total == 0 {
            return 100.0;
        }

        let phase_total = state.timer.total_secs().unwrap_or(0);
        let phase_elapsed = u64::from(phase_total.saturating_sub(state.remaining_secs()));
        let before_phase = match state.phase {
            ActivePhase::Work => u64::from(self.timing.prep().get()),
            _ => 0,
        };
        let done = per_exercise * state.index as u64 + before_phase + phase_elapsed;
        (done as f64 / total as f64 * 100.0).min(100.0)
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        let phase = self.phase();
        let index = phase.index();
        let (remaining_secs, total_secs) = self
            .state
            .as_ref()
            .map(|s| (s.remaining_secs(), s.timer.total_secs().unwrap_or(0)))
            .unwrap_or((0, 0));

        SessionSnapshot {
            session_id: self.state.as_ref().map(|s| s.session_id),
            phase,
            protocol: self.queue.protocol.clone(),
            exercise_count: self.queue.len(),
            exercise: index.and_then(|i| self.queue.get(i)).cloned(),
            next_label: index.map(|i| self.queue.next_label(i).to_string()),
            remaining_secs,
            total_secs,
            phase_progress: progress_fraction(total_secs, remaining_secs),
            workout_progress_pct: self.workout_progress_pct(),
            started_at: self.state.as_ref().map(|s| s.started_at),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the workout from `Idle`.
    ///
    /// An empty queue goes straight to `Complete` without any countdown.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyStarted` unless the session is idle.
    pub fn start(&mut self) -> Result<SessionEvent, SessionError> {
        if self.state.is_some() {
            return Err(SessionError::AlreadyStarted);
        }

        let state = self.state.insert(SessionState::new());
        let session_id = state.session_id;
        tracing::info!(
            %session_id,
            protocol = %self.queue.protocol,
            exercises = self.queue.len(),
            "workout started"
        );

        if self.queue.is_empty() {
            self.enter_complete(None);
        } else {
            self.enter_prep(0, None);
        }

        Ok(SessionEvent::SessionStarted {
            session_id,
            protocol: self.queue.protocol.clone(),
            exercise_count: self.queue.len(),
            first_phase: self.phase(),
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns an event when the phase changes.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        let state = self.state.as_mut()?;
        let tick = state.timer.tick()?;
        let index = state.index;
        let phase = state.phase;

        notify(
            "show_countdown",
            self.sink.show_countdown(tick.remaining_secs, tick.progress()),
        );

        if !tick.finished {
            return None;
        }

        match phase {
            ActivePhase::Prep => Some(self.enter_work(index, Some(BEGIN_CUE))),
            ActivePhase::Work if index + 1 < self.queue.len() => {
                Some(self.enter_prep(index + 1, Some(REST_CUE)))
            }
            ActivePhase::Work => Some(self.enter_complete(Some(REST_CUE))),
            ActivePhase::Complete => None,
        }
    }

    /// Cancel any live countdown and return to `Idle`. Safe from any state.
    pub fn reset(&mut self) -> SessionEvent {
        let session_id = self.state.take().map(|mut state| {
            state.timer.cancel();
            tracing::info!(session_id = %state.session_id, phase = state.phase().label(), "workout reset");
            state.session_id
        });
        SessionEvent::SessionReset {
            session_id,
            at: Utc::now(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn enter_prep(&mut self, index: usize, cue: Option<&str>) -> SessionEvent {
        let record = &self.queue.exercises[index];
        let next_label = self.queue.next_label(index);

        notify("show_exercise", self.sink.show_exercise(record, next_label));
        let announcement = with_cue(cue, &next_up_announcement(&record.name, &record.detail));
        notify("announce", self.sink.announce(&announcement));

        let duration = self.timing.prep();
        self.begin_countdown(index, ActivePhase::Prep, duration)
    }

    fn enter_work(&mut self, index: usize, cue: Option<&str>) -> SessionEvent {
        notify("show_phase", self.sink.show_phase(SessionPhase::Work { index }));
        notify("announce", self.sink.announce(&with_cue(cue, "")));

        let duration = self.timing.work();
        self.begin_countdown(index, ActivePhase::Work, duration)
    }

    fn enter_complete(&mut self, cue: Option<&str>) -> SessionEvent {
        let exercises_done = self.queue.len();
        let session_id = match self.state.as_mut() {
            Some(state) => {
                state.timer.cancel();
                state.phase = ActivePhase::Complete;
                state.session_id
            }
            None => uuid::Uuid::nil(),
        };

        notify("show_phase", self.sink.show_phase(SessionPhase::Complete));
        notify(
            "announce",
            self.sink.announce(&with_cue(cue, COMPLETE_ANNOUNCEMENT)),
        );

        tracing::info!(%session_id, exercises_done, "workout complete");
        SessionEvent::SessionCompleted {
            session_id,
            exercises_done,
            at: Utc::now(),
        }
    }

    /// Switch phase and start its countdown, pushing the initial value.
    fn begin_countdown(
        &mut self,
        index: usize,
        phase: ActivePhase,
        duration: NonZeroU32,
    ) -> SessionEvent {
        let exercise_id = self.queue.exercises[index].id.clone();
        let Some(state) = self.state.as_mut() else {
            // Transitions only run on a started session.
            debug_assert!(false, "phase transition without session state");
            return SessionEvent::SessionReset {
                session_id: None,
                at: Utc::now(),
            };
        };

        if state.timer.is_active() {
            let misuse = TimerError::Misuse {
                phase: state.phase().label().to_string(),
            };
            debug_assert!(false, "{misuse}");
            tracing::error!(
                error = %misuse,
                run = state.timer.run_id(),
                "cancelling stray countdown"
            );
            state.timer.cancel();
        }

        state.index = index;
        state.phase = phase;
        let tick = state.timer.start(duration);
        let session_id = state.session_id;
        let entered = state.phase();

        tracing::debug!(
            %session_id,
            phase = entered.label(),
            index,
            run = state.timer.run_id(),
            secs = duration.get(),
            "phase entered"
        );
        notify(
            "show_countdown",
            self.sink.show_countdown(tick.remaining_secs, tick.progress()),
        );

        SessionEvent::PhaseEntered {
            session_id,
            phase: entered,
            exercise_id,
            duration_secs: duration.get(),
            at: Utc::now(),
        }
    }
}

/// Join a completion cue and the next announcement into one utterance.
fn with_cue(cue: Option<&str>, text: &str) -> String {
    match (cue, text.is_empty()) {
        (Some(cue), true) => cue.to_string(),
        (Some(cue), false) => format!("{cue} {text}"),
        (None, _) => text.to_string(),
    }
}

fn notify(operation: &str, result: Result<(), SinkError>) {
    if let Err(e) = result {
        tracing::warn!(operation, error = %e, "notification sink failed");
    }
}
