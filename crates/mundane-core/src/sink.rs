//! Notification sink: where the session pushes display and speech output.
//!
//! The session only writes to a sink and never waits on it. Every method
//! may fail; failures are logged by the session and otherwise ignored.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseRecord;
use crate::error::SinkError;
use crate::session::SessionPhase;

pub type SinkResult = Result<(), SinkError>;

/// Rendering/speech capability used by the workout session.
pub trait NotificationSink {
    /// Show the current exercise and the name of what comes next
    /// (or the cool-down sentinel).
    fn show_exercise(&mut self, record: &ExerciseRecord, next_label: &str) -> SinkResult;

    fn show_countdown(&mut self, remaining_secs: u32, progress: f64) -> SinkResult;

    /// Speak or otherwise render a prompt.
    fn announce(&mut self, text: &str) -> SinkResult;

    /// Switch views. Optional.
    fn show_phase(&mut self, _phase: SessionPhase) -> SinkResult {
        Ok(())
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn show_exercise(&mut self, record: &ExerciseRecord, next_label: &str) -> SinkResult {
        (**self).show_exercise(record, next_label)
    }

    fn show_countdown(&mut self, remaining_secs: u32, progress: f64) -> SinkResult {
        (**self).show_countdown(remaining_secs, progress)
    }

    fn announce(&mut self, text: &str) -> SinkResult {
        (**self).announce(text)
    }

    fn show_phase(&mut self, phase: SessionPhase) -> SinkResult {
        (**self).show_phase(phase)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn show_exercise(&mut self, _record: &ExerciseRecord, _next_label: &str) -> SinkResult {
        Ok(())
    }

    fn show_countdown(&mut self, _remaining_secs: u32, _progress: f64) -> SinkResult {
        Ok(())
    }

    fn announce(&mut self, _text: &str) -> SinkResult {
        Ok(())
    }
}

/// A notification as received by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Exercise { id: String, name: String, next_label: String },
    Countdown { remaining_secs: u32, progress: f64 },
    Announce { text: String },
    Phase { phase: SessionPhase },
}

impl Notification {
    /// Display updates are everything except announcements.
    pub fn is_display(&self) -> bool {
        !matches!(self, Notification::Announce { .. })
    }
}

/// Keeps an ordered log of notifications. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn announcements(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Announce { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) -> SinkResult {
        self.lock().push(notification);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationSink for RecordingSink {
    fn show_exercise(&mut self, record: &ExerciseRecord, next_label: &str) -> SinkResult {
        self.push(Notification::Exercise {
            id: record.id.clone(),
            name: record.name.clone(),
            next_label: next_label.to_string(),
        })
    }

    fn show_countdown(&mut self, remaining_secs: u32, progress: f64) -> SinkResult {
        self.push(Notification::Countdown {
            remaining_secs,
            progress,
        })
    }

    fn announce(&mut self, text: &str) -> SinkResult {
        self.push(Notification::Announce {
            text: text.to_string(),
        })
    }

    fn show_phase(&mut self, phase: SessionPhase) -> SinkResult {
        self.push(Notification::Phase { phase })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_clones_share_log() {
        let sink = RecordingSink::new();
        let mut writer = sink.clone();
        writer.announce("Begin.").unwrap();
        writer.show_countdown(45, 0.0).unwrap();

        assert_eq!(sink.announcements(), ["Begin."]);
        assert_eq!(sink.notifications().len(), 2);
        assert!(sink.notifications()[1].is_display());

        assert_eq!(writer.notifications(), sink.notifications());
    }

    #[test]
    fn boxed_sink_forwards() {
        let sink = RecordingSink::new();
        let mut boxed: Box<dyn NotificationSink> = Box::new(sink.clone());
        boxed.show_phase(SessionPhase::Complete).unwrap();
        assert_eq!(
            sink.notifications(),
            [Notification::Phase { phase: SessionPhase::Complete }]
        );
    }
}
