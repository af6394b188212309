// src/utils/format.rs

/// Human formatting for attempt durations, e.g. "45s", "12min", "1h05min".
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    if hours > 0 {
        format!("{}h{:02}min", hours, minutes)
    } else if minutes > 0 {
        format!("{}min", minutes)
    } else {
        format!("{}s", total_secs)
    }
}
