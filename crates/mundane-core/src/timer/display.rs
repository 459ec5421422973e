/// Remaining seconds at or below which the clock is highlighted.
pub const FINAL_SECONDS: u32 = 3;

/// `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn is_final_seconds(remaining_secs: u32) -> bool {
    remaining_secs <= FINAL_SECONDS
}
