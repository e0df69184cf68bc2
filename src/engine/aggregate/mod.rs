pub mod executor;
pub mod function;
pub mod record;
pub mod request;
pub mod select;

pub use executor::execute;
pub use function::AggregateFunction;
pub use record::AggregateRecord;
pub use request::{AggregateRequest, AggregationOptions, aggregate};
pub use select::{AggregateRow, AggregateSelect, ColumnStat, META_COLUMNS};

#[cfg(test)]
mod function_test;
