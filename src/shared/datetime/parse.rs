use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses user supplied datetimes onto a naive timeline.
///
/// Offsets are dropped, not applied: `2021-01-01T05:00:00+05:00` becomes
/// `2021-01-01T05:00:00`. Bucket math runs on wall-clock values.
pub struct TimeParser;

impl TimeParser {
    pub fn parse_naive(input: &str) -> Option<NaiveDateTime> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.naive_local());
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
        // A bare year means the first instant of that year
        if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
            let year = s.parse::<i32>().ok()?;
            return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
        }
        None
    }
}
