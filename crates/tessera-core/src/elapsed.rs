//! Elapsed-time formatting
//!
//! Humanizes "last seen" timestamps with day/hour/minute/second bucketing.

use chrono::{DateTime, Utc};

/// Sentinel rendered for an absent timestamp.
pub const NEVER: &str = "∞";

/// Format how long ago `instant` was, relative to now.
///
/// `None` renders as `"∞"`. Otherwise the largest whole bucket wins:
/// `"2 day(s) ago"`, `"3 hour(s) ago"`, `"1 minute(s) ago"`,
/// `"30 second(s) ago"`.
pub fn last_seen(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        None => NEVER.to_string(),
        Some(dt) => last_seen_at(dt, Utc::now()),
    }
}

fn last_seen_at(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(instant);

    if delta.num_days() >= 1 {
        return format!("{} day(s) ago", delta.num_days());
    }
    if delta.num_hours() >= 1 {
        return format!("{} hour(s) ago", delta.num_hours());
    }
    if delta.num_minutes() >= 1 {
        return format!("{} minute(s) ago", delta.num_minutes());
    }
    format!("{} second(s) ago", delta.num_seconds().max(0))
}
