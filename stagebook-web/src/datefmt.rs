//! Display formatting for show start times
//!
//! Parses the ISO-like stored timestamp and renders one of two fixed
//! human-readable styles. Display only; storage keeps the raw timestamp.

use chrono::NaiveDateTime;

/// Rendering style for a show timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// e.g. "Monday January, 5, 2026 at 8:00PM"
    Full,
    /// e.g. "Mon 01, 05, 2026 8:00PM"
    Medium,
}

/// Parse an ISO-like timestamp string, accepting both 'T' and space
/// separators, with or without seconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
}

/// Render a timestamp in the requested style
pub fn format_datetime(dt: NaiveDateTime, style: DateStyle) -> String {
    match style {
        DateStyle::Full => dt.format("%A %B, %-d, %Y at %-I:%M%p").to_string(),
        DateStyle::Medium => dt.format("%a %m, %d, %Y %-I:%M%p").to_string(),
    }
}
