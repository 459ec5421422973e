//! Session planner: weekday -> protocol -> ordered workout queue.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ExerciseRecord, ProtocolTable, Schedule};
use crate::error::ConfigError;

/// Label shown as "up next" during the last exercise.
pub const COOL_DOWN_LABEL: &str = "Cool Down";

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The resolved, ordered exercises for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutQueue {
    pub weekday: u8,
    pub protocol: String,
    pub exercises: Vec<ExerciseRecord>,
}

impl WorkoutQueue {
    /// A queue built directly from records, bypassing the schedule.
    pub fn from_exercises(protocol: impl Into<String>, exercises: Vec<ExerciseRecord>) -> Self {
        Self {
            weekday: 0,
            protocol: protocol.into(),
            exercises,
        }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExerciseRecord> {
        self.exercises.get(index)
    }

    /// Name of the exercise after `index`, or the cool-down sentinel.
    pub fn next_label(&self, index: usize) -> &str {
        index
            .checked_add(1)
            .and_then(|next| self.exercises.get(next))
            .map(|record| record.name.as_str())
            .unwrap_or(COOL_DOWN_LABEL)
    }

    /// `"TODAY: PUSH PROTOCOL"`
    pub fn banner(&self) -> String {
        format!("TODAY: {} PROTOCOL", self.protocol.to_uppercase())
    }
}

/// Resolve the workout queue for `weekday` (0 = Sunday .. 6 = Saturday).
///
/// # Errors
///
/// - `UnknownWeekday` if the schedule has no entry for the day
/// - `UnknownProtocol` if the scheduled protocol is not defined
/// - `UnknownExercise` if any protocol entry is missing from the catalog
pub fn resolve_today_queue(
    weekday: u8,
    schedule: &Schedule,
    protocols: &ProtocolTable,
    catalog: &Catalog,
) -> Result<WorkoutQueue, ConfigError> {
    let protocol = schedule
        .protocol_for(weekday)
        .ok_or(ConfigError::UnknownWeekday { weekday })?;

    let ids = protocols
        .get(protocol)
        .ok_or_else(|| ConfigError::UnknownProtocol {
            protocol: protocol.to_string(),
        })?;

    let exercises = ids
        .iter()
        .map(|id| {
            catalog
                .get(id)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownExercise {
                    protocol: protocol.to_string(),
                    exercise: id.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(weekday, protocol, exercises = exercises.len(), "resolved workout queue");

    Ok(WorkoutQueue {
        weekday,
        protocol: protocol.to_string(),
        exercises,
    })
}

/// Today's weekday index in local time, 0 = Sunday.
pub fn today_weekday() -> u8 {
    Local::now().weekday().num_days_from_sunday() as u8
}

pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(usize::from(weekday)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WorkoutData;

    fn record(id: &str, name: &str) -> ExerciseRecord {
        ExerciseRecord {
            id: id.into(),
            name: name.into(),
            equipment: "DB".into(),
            setting: None,
            detail: format!("{name} detail"),
            vis_static: format!("{id}.png"),
            vis_loop: format!("{id}.gif"),
        }
    }

    fn tables() -> (Schedule, ProtocolTable, Catalog) {
        let mut schedule = Schedule::default();
        schedule.assign(1, "push").unwrap();
        schedule.assign(2, "ghost").unwrap();
        schedule.assign(3, "broken").unwrap();

        let mut protocols = ProtocolTable::default();
        protocols.insert("push", vec!["b".into(), "a".into()]);
        protocols.insert("broken", vec!["a".into(), "zzz".into()]);

        let catalog = [record("a", "A"), record("b", "B")].into_iter().collect();
        (schedule, protocols, catalog)
    }

    #[test]
    fn queue_json_roundtrip_keeps_exercise_ids() {
        let queue = WorkoutData::builtin().unwrap().plan_for(1).unwrap();
        let json = serde_json::to_string(&queue).unwrap();
        let back: WorkoutQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.exercises[0].id, "chest_press_incline");
        assert_eq!(back, queue);
    }

    #[test]
    fn resolves_in_protocol_order() {
        let (schedule, protocols, catalog) = tables();
        let queue = resolve_today_queue(1, &schedule, &protocols, &catalog).unwrap();
        let names: Vec<_> = queue.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(queue.protocol, "push");
        assert_eq!(queue.weekday, 1);
    }

    #[test]
    fn unscheduled_day_is_unknown_weekday() {
        let (schedule, protocols, catalog) = tables();
        assert_eq!(
            resolve_today_queue(0, &schedule, &protocols, &catalog),
            Err(ConfigError::UnknownWeekday { weekday: 0 })
        );
        assert_eq!(
            resolve_today_queue(9, &schedule, &protocols, &catalog),
            Err(ConfigError::UnknownWeekday { weekday: 9 })
        );
    }

    #[test]
    fn undefined_protocol_is_unknown_protocol() {
        let (schedule, protocols, catalog) = tables();
        assert_eq!(
            resolve_today_queue(2, &schedule, &protocols, &catalog),
            Err(ConfigError::UnknownProtocol { protocol: "ghost".into() })
        );
    }

    #[test]
    fn dangling_exercise_never_yields_partial_queue() {
        let (schedule, protocols, catalog) = tables();
        assert_eq!(
            resolve_today_queue(3, &schedule, &protocols, &catalog),
            Err(ConfigError::UnknownExercise {
                protocol: "broken".into(),
                exercise: "zzz".into(),
            })
        );
    }

    #[test]
    fn next_label_falls_back_to_cool_down() {
        let queue = WorkoutQueue::from_exercises("push", vec![record("a", "A"), record("b", "B")]);
        assert_eq!(queue.next_label(0), "B");
        assert_eq!(queue.next_label(1), COOL_DOWN_LABEL);
        assert_eq!(queue.next_label(usize::MAX), COOL_DOWN_LABEL);
    }

    #[test]
    fn builtin_monday_is_push() {
        let data = WorkoutData::builtin().unwrap();
        let queue = data.plan_for(1).unwrap();
        assert_eq!(queue.banner(), "TODAY: PUSH PROTOCOL");
        assert_eq!(queue.exercises[0].name, "Incline DB Press");
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), Some("Sunday"));
        assert_eq!(weekday_name(6), Some("Saturday"));
        assert_eq!(weekday_name(7), None);
        assert!(today_weekday() < 7);
    }
}
