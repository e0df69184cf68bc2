pub mod buckets;
pub mod errors;
pub mod parse;
pub mod unit;

pub use buckets::{generate_buckets, render_bucket_label, truncate, zero_datetime};
pub use errors::BucketError;
pub use parse::TimeParser;
pub use unit::TimeUnit;

#[cfg(test)]
mod unit_test;
