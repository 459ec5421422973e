use std::path::PathBuf;

use clap::Args;
use mundane_core::{today_weekday, Config, SessionRunner, SessionTiming, WorkoutSession};

use super::CommandResult;
use crate::terminal::TerminalSink;

#[derive(Args)]
pub struct StartArgs {
    /// Weekday index to run (0 = Sunday .. 6 = Saturday); defaults to today
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub weekday: Option<u8>,
    /// Workout document to use instead of the configured one
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Prep countdown in seconds (overrides config)
    #[arg(long)]
    pub prep: Option<u32>,
    /// Work countdown in seconds (overrides config)
    #[arg(long)]
    pub work: Option<u32>,
}

pub fn run(args: StartArgs) -> CommandResult {
    let config = Config::load()?;
    let timing = SessionTiming::new(
        args.prep.unwrap_or(config.session.prep_secs),
        args.work.unwrap_or(config.session.work_secs),
    )?;
    let weekday = args.weekday.unwrap_or_else(today_weekday);
    let queue = super::plan(&config, args.data.as_deref(), weekday)?;

    println!("{}", queue.banner());
    let sink = TerminalSink::new(&config.speech);
    let session = WorkoutSession::new(queue, timing, sink);

    // The session is single-threaded; ticks and commands share one task.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let handle = SessionRunner::new(session).spawn();
        handle.start().await?;

        tokio::select! {
            result = handle.wait_until_complete() => result?,
            _ = tokio::signal::ctrl_c() => {
                handle.reset().await?;
                println!();
                println!("workout reset");
            }
        }

        handle.shutdown().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
