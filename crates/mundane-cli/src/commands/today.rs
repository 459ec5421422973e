use std::path::PathBuf;

use clap::Args;
use mundane_core::{today_weekday, weekday_name, Config};

use super::CommandResult;

#[derive(Args)]
pub struct TodayArgs {
    /// Weekday index to plan for (0 = Sunday .. 6 = Saturday); defaults to today
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub weekday: Option<u8>,
    /// Workout document to use instead of the configured one
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Print the queue as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TodayArgs) -> CommandResult {
    let config = Config::load()?;
    let weekday = args.weekday.unwrap_or_else(today_weekday);
    let queue = super::plan(&config, args.data.as_deref(), weekday)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&queue)?);
        return Ok(());
    }

    println!("{}", queue.banner());
    println!("{}", weekday_name(weekday).unwrap_or_default());
    println!();
    for (i, exercise) in queue.exercises.iter().enumerate() {
        println!(
            "{:>2}. {} [{} | {}]",
            i + 1,
            exercise.name,
            exercise.equipment,
            exercise.setting_label()
        );
        println!("    {}", exercise.detail);
    }
    Ok(())
}
