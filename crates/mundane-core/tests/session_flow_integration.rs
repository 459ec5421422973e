//! Integration tests for planning and walking a workout session.

use mundane_core::error::SinkError;
use mundane_core::sink::SinkResult;
use mundane_core::{
    ExerciseRecord, Notification, NotificationSink, RecordingSink, SessionEvent, SessionPhase,
    SessionTiming, WorkoutData, WorkoutQueue, WorkoutSession,
};

const TWO_EXERCISE_WEEK: &str = r#"{
    "schedule": {"1": "push"},
    "protocols": {"push": ["a", "b"]},
    "library": {
        "a": {"name": "A", "equipment": "DB", "detail": "First.", "vis_static": "a.png", "vis_loop": "a.gif"},
        "b": {"name": "B", "equipment": "DB + Bench", "setting": "Flat", "detail": "Second.", "vis_static": "b.png", "vis_loop": "b.gif"}
    }
}"#;

/// Drive the session until it stops running, collecting events.
fn drain<S: NotificationSink>(session: &mut WorkoutSession<S>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while session.is_running() {
        events.extend(session.tick());
    }
    events
}

#[test]
fn test_two_exercise_scenario_end_to_end() {
    let data = WorkoutData::from_json_str(TWO_EXERCISE_WEEK).unwrap();
    let queue = data.plan_for(1).unwrap();
    let names: Vec<_> = queue.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);

    let sink = RecordingSink::new();
    let mut session = WorkoutSession::new(queue, SessionTiming::new(5, 45).unwrap(), sink.clone());
    session.start().unwrap();
    let events = drain(&mut session);

    let phases: Vec<_> = events
        .iter()
        .map(|e| match e {
            SessionEvent::PhaseEntered { phase, .. } => *phase,
            SessionEvent::SessionCompleted { .. } => SessionPhase::Complete,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        phases,
        [
            SessionPhase::Work { index: 0 },
            SessionPhase::Prep { index: 1 },
            SessionPhase::Work { index: 1 },
            SessionPhase::Complete,
        ]
    );
    assert_eq!(session.phase(), SessionPhase::Complete);

    let up_next: Vec<_> = sink
        .notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::Exercise { name, next_label, .. } => Some((name, next_label)),
            _ => None,
        })
        .collect();
    assert_eq!(
        up_next,
        [
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "Cool Down".to_string()),
        ]
    );
}

#[test]
fn test_every_announcement_follows_a_display_update() {
    let data = WorkoutData::builtin().unwrap();
    let queue = data.plan_for(1).unwrap();
    let n = queue.len();

    let sink = RecordingSink::new();
    let mut session = WorkoutSession::new(queue, SessionTiming::new(2, 3).unwrap(), sink.clone());
    session.start().unwrap();
    drain(&mut session);

    let notes = sink.notifications();
    let mut prep_entries = 0;
    let mut work_entries = 0;
    for (i, note) in notes.iter().enumerate() {
        if let Notification::Announce { .. } = note {
            let previous = &notes[i - 1];
            assert!(previous.is_display(), "announcement at {i} not preceded by display");
            match previous {
                Notification::Exercise { .. } => prep_entries += 1,
                Notification::Phase { phase: SessionPhase::Work { .. } } => work_entries += 1,
                Notification::Phase { phase: SessionPhase::Complete } => {}
                other => panic!("unexpected display before announcement: {other:?}"),
            }
        }
    }
    assert_eq!(prep_entries, n);
    assert_eq!(work_entries, n);
}

#[test]
fn test_countdown_values_strictly_decrease_within_a_phase() {
    let queue = WorkoutQueue::from_exercises("solo", vec![exercise("a", "A")]);
    let sink = RecordingSink::new();
    let mut session = WorkoutSession::new(queue, SessionTiming::new(3, 4).unwrap(), sink.clone());
    session.start().unwrap();
    drain(&mut session);

    let countdowns: Vec<u32> = sink
        .notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::Countdown { remaining_secs, .. } => Some(remaining_secs),
            _ => None,
        })
        .collect();
    // Prep: 3..0 (four values), work: 4..0 (five values).
    assert_eq!(countdowns, [3, 2, 1, 0, 4, 3, 2, 1, 0]);
}

/// A sink whose renderer has gone away.
struct UnavailableSink {
    calls: usize,
}

impl NotificationSink for UnavailableSink {
    fn show_exercise(&mut self, _record: &ExerciseRecord, _next_label: &str) -> SinkResult {
        self.calls += 1;
        Err(SinkError::Unavailable("display detached".into()))
    }

    fn show_countdown(&mut self, _remaining_secs: u32, _progress: f64) -> SinkResult {
        self.calls += 1;
        Err(SinkError::Unavailable("display detached".into()))
    }

    fn announce(&mut self, _text: &str) -> SinkResult {
        self.calls += 1;
        Err(SinkError::Unavailable("speech detached".into()))
    }
}

#[test]
fn test_unavailable_sink_does_not_stop_the_workout() {
    let queue = WorkoutQueue::from_exercises("pair", vec![exercise("a", "A"), exercise("b", "B")]);
    let mut session =
        WorkoutSession::new(queue, SessionTiming::new(1, 1).unwrap(), UnavailableSink { calls: 0 });
    session.start().unwrap();
    let events = drain(&mut session);

    assert_eq!(session.phase(), SessionPhase::Complete);
    assert!(matches!(events.last(), Some(SessionEvent::SessionCompleted { exercises_done: 2, .. })));
    assert!(session.sink().calls > 0);
}

#[test]
fn test_reset_mid_phase_then_restart() {
    let queue = WorkoutQueue::from_exercises("pair", vec![exercise("a", "A"), exercise("b", "B")]);
    let mut session = WorkoutSession::new(queue, SessionTiming::default(), RecordingSink::new());
    session.start().unwrap();
    for _ in 0..7 {
        session.tick();
    }
    assert_eq!(session.phase(), SessionPhase::Work { index: 0 });

    session.reset();
    session.reset();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(!session.has_active_timer());

    session.start().unwrap();
    assert_eq!(session.phase(), SessionPhase::Prep { index: 0 });
    assert_eq!(session.remaining_secs(), 5);
}

fn exercise(id: &str, name: &str) -> ExerciseRecord {
    ExerciseRecord {
        id: id.into(),
        name: name.into(),
        equipment: "DB".into(),
        setting: None,
        detail: String::new(),
        vis_static: String::new(),
        vis_loop: String::new(),
    }
}

#[test]
fn test_reset_after_completion_returns_to_idle() {
    let data = WorkoutData::from_json_str(TWO_EXERCISE_WEEK).unwrap();
    let queue = data.plan_for(1).unwrap();
    let mut session = WorkoutSession::new(queue, SessionTiming::new(1, 1).unwrap(), RecordingSink::new());
    session.start().unwrap();
    drain(&mut session);
    assert_eq!(session.phase(), SessionPhase::Complete);

    let first = session.reset();
    assert!(matches!(first, SessionEvent::SessionReset { session_id: Some(_), .. }));
    let second = session.reset();
    assert!(matches!(second, SessionEvent::SessionReset { session_id: None, .. }));

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(!session.has_active_timer());
    assert_eq!(session.tick(), None);
    assert!(session.start().is_ok());
}
