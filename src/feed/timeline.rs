//! Relative age formatting for feed entries.

use chrono::{DateTime, Utc};

/// Minutes in an hour.
const HOUR: i64 = 60;
/// Minutes in a day.
const DAY: i64 = 1_440;
/// Days after which the absolute date is shown.
const WEEK_DAYS: i64 = 7;

/// Formats how long ago a post was created, the way the feed displays it.
///
/// `now` is passed in rather than read from the system clock so callers
/// and tests control it.
#[must_use]
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < HOUR {
        format!("{minutes}m ago")
    } else if minutes < DAY {
        format!("{}h ago", minutes / HOUR)
    } else if minutes / DAY < WEEK_DAYS {
        format!("{}d ago", minutes / DAY)
    } else {
        format!("on {}", created_at.format("%-m/%-d/%Y"))
    }
}
