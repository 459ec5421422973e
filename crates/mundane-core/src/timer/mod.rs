mod display;
mod interval;

pub use display::{format_clock, is_final_seconds, FINAL_SECONDS};
pub use interval::{progress_fraction, IntervalTimer, Tick};
