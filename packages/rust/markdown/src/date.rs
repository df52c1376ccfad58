//! `*Published: ...*` date parsing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Accepted date layouts, tried in order. The first match wins.
///
/// - `January 5, 2024`
/// - `2024-01-05`
/// - `5 January 2024`
/// - `2024/01/05`
pub const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%Y-%m-%d", "%d %B %Y", "%Y/%m/%d"];

/// Parse the raw text of a `*Published: ...*` marker.
///
/// Surrounding whitespace is ignored. Returns `None` when no layout matches
/// or the date does not exist (e.g. `2024-13-45`).
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parse a published date and widen it to midnight of that day.
pub fn parse_published_datetime(raw: &str) -> Option<NaiveDateTime> {
    parse_published_date(raw).map(|d| d.and_time(NaiveTime::MIN))
}
