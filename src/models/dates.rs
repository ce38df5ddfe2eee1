//! Display helpers for stored timestamps

use chrono::{DateTime, Utc};

/// Medium date, e.g. `Dec 16, 1775`
pub fn medium(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Calendar date for `<input type="date">` values
pub fn iso(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn medium_or(date: Option<&DateTime<Utc>>, fallback: &str) -> String {
    date.map(medium).unwrap_or_else(|| fallback.to_string())
}

pub fn iso_or_empty(date: Option<&DateTime<Utc>>) -> String {
    date.map(iso).unwrap_or_default()
}
