use super::errors::StorageError;
use crate::engine::aggregate::{AggregateRow, AggregateSelect};
use crate::engine::filter::RecordQuery;
use crate::engine::sensor::Node;
use crate::engine::types::Row;
use chrono::NaiveDateTime;

/// Runs validated queries against the backing store.
pub trait QueryExecutor: Send + Sync {
    fn execute_filter(&self, query: &RecordQuery) -> Result<Vec<Row>, StorageError>;

    /// One grouped aggregate over `[window_start, window_end)`. Rows come
    /// back ordered by bucket label; an empty window returns no rows.
    fn execute_aggregate(
        &self,
        select: &AggregateSelect,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<AggregateRow>, StorageError>;
}

/// Node metadata lookup.
pub trait NodeCatalog: Send + Sync {
    /// Ids compare case-insensitively.
    fn get_node(&self, id: &str) -> Result<Option<Node>, StorageError>;

    fn nodes(&self) -> Result<Vec<Node>, StorageError>;
}
