use super::errors::BucketError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of a time bucket.
///
/// Ordered from coarsest to finest so that `unit < other` means `unit` spans
/// more time than `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

/// How a unit advances a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fixed(Duration),
    /// Number of calendar months per step
    Calendar(u32),
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Week => "week",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }

    /// One step of this unit. Months and years vary in length and are
    /// stepped with calendar arithmetic.
    pub fn step(&self) -> Step {
        match self {
            TimeUnit::Year => Step::Calendar(12),
            TimeUnit::Month => Step::Calendar(1),
            TimeUnit::Week => Step::Fixed(Duration::weeks(1)),
            TimeUnit::Day => Step::Fixed(Duration::days(1)),
            TimeUnit::Hour => Step::Fixed(Duration::hours(1)),
            TimeUnit::Minute => Step::Fixed(Duration::minutes(1)),
            TimeUnit::Second => Step::Fixed(Duration::seconds(1)),
        }
    }

    pub fn is_calendar(&self) -> bool {
        matches!(self.step(), Step::Calendar(_))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = BucketError;

    /// Accepts singular or plural, any case (`hour`, `Hours`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);
        match singular {
            "year" => Ok(TimeUnit::Year),
            "month" => Ok(TimeUnit::Month),
            "week" => Ok(TimeUnit::Week),
            "day" => Ok(TimeUnit::Day),
            "hour" => Ok(TimeUnit::Hour),
            "minute" => Ok(TimeUnit::Minute),
            "second" => Ok(TimeUnit::Second),
            _ => Err(BucketError::UnknownUnit(s.to_string())),
        }
    }
}
