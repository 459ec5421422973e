use std::path::PathBuf;

use clap::Args;
use mundane_core::catalog::DAYS_PER_WEEK;
use mundane_core::{weekday_name, Config, WorkoutData};

use super::CommandResult;

#[derive(Args)]
pub struct ValidateArgs {
    /// Workout document to check; defaults to the configured one
    #[arg(long)]
    pub data: Option<PathBuf>,
}

pub fn run(args: ValidateArgs) -> CommandResult {
    let data = match args.data {
        Some(path) => WorkoutData::from_path(&path)?,
        None => Config::load()?.workout_data()?,
    };

    let protocol_count = data.protocols.iter().count();
    println!(
        "ok: {} exercises, {} protocols",
        data.library.len(),
        protocol_count
    );

    for weekday in 0..DAYS_PER_WEEK {
        let day = weekday_name(weekday).unwrap_or_default();
        match data.schedule.protocol_for(weekday) {
            Some(protocol) => println!("  {day:<9} {protocol}"),
            None => println!("  {day:<9} (no workout scheduled)"),
        }
    }
    Ok(())
}
