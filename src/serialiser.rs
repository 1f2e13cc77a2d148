//! Time-code formatting for the transcript renderer.

/// Formats a seconds offset as a canonical `HH:MM:SS,mmm` time-code.
/// Round-trips the parser's output to the millisecond.
pub fn format_timecode(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Formats a seconds offset as the short `M:SS` clock shown next to each
/// transcript entry.
pub fn format_clock(seconds: f64) -> String {
    let total_secs = seconds as u64;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
