pub mod completions;
pub mod config;
pub mod start;
pub mod today;
pub mod validate;

use std::path::Path;

use mundane_core::{weekday_name, Config, WorkoutData, WorkoutQueue};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the workout document (`data` or the configured one) and resolve a
/// weekday's queue.
///
/// A day with no resolvable queue is reported as "no workout available"
/// rather than producing an empty session.
pub fn plan(
    config: &Config,
    data: Option<&Path>,
    weekday: u8,
) -> Result<WorkoutQueue, Box<dyn std::error::Error>> {
    let data = match data {
        Some(path) => WorkoutData::from_path(path)?,
        None => config.workout_data()?,
    };
    let queue = data.plan_for(weekday).map_err(|e| {
        let day = weekday_name(weekday).unwrap_or("unknown day");
        format!("no workout available for {day}: {e}")
    })?;
    Ok(queue)
}
