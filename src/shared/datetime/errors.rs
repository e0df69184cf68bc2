use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BucketError {
    #[error("Unknown time unit: {0}")]
    UnknownUnit(String),

    #[error("Start {start} is after end {end}")]
    InvertedRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Bucket boundary overflowed after {0}")]
    Overflow(NaiveDateTime),
}
