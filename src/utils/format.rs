//! Remaining-time formatting for titles

use chrono::TimeDelta;

/// Prefix shown in front of every title
pub const TITLE_PREFIX: &str = "🍅";

/// Render a remaining time truncated to whole seconds, e.g. `24m59s`, `0s`
/// or `-1s`.
pub fn format_remaining(remaining: TimeDelta) -> String {
    let total = remaining.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

pub fn format_title(remaining: TimeDelta) -> String {
    format!("{TITLE_PREFIX}{}", format_remaining(remaining))
}
