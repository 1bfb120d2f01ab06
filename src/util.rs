//! Utility functions for mortem

use chrono::{DateTime, Utc};

/// Formats a timestamp as human readable relative time
///
/// Converts an absolute time to relative strings like "5 min ago" or
/// "2 weeks ago". Future timestamps are treated as "just now".
///
/// # Arguments
///
/// * `when`: Moment to describe relative to now
///
/// # Returns
///
/// Human readable relative time string
pub fn format_timestamp(when: DateTime<Utc>) -> String {
    // Clock skew can put stored timestamps slightly in the future
    let secs = (Utc::now() - when).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}
