use super::errors::StorageError;
use super::traits::{NodeCatalog, QueryExecutor};
use crate::engine::aggregate::{AggregateRow, AggregateSelect, ColumnStat};
use crate::engine::aggregate::select::TIME_COLUMN;
use crate::engine::filter::RecordQuery;
use crate::engine::schema::{SchemaError, SchemaProvider, TableDescriptor};
use crate::engine::sensor::{FeatureRow, Node};
use crate::engine::types::{Row, ScalarValue};
use crate::shared::datetime::truncate;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct MemoryTable {
    descriptor: TableDescriptor,
    rows: Vec<Row>,
}

/// In-process store that answers schema, filter, aggregate and node
/// lookups from memory. Clauses are evaluated row by row.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<IndexMap<String, MemoryTable>>,
    nodes: RwLock<Vec<Node>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any table of the same name.
    pub fn create_table(&self, descriptor: TableDescriptor) {
        self.tables.write().insert(
            descriptor.name.clone(),
            MemoryTable {
                descriptor,
                rows: Vec::new(),
            },
        );
    }

    /// Append a row. Columns the table does not declare are dropped and
    /// declared columns missing from the row are stored as null.
    pub fn insert(&self, table: &str, row: Row) -> Result<(), StorageError> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(table)
            .ok_or_else(|| StorageError::UnknownTable(table.to_string()))?;

        let shaped: Row = target
            .descriptor
            .columns
            .iter()
            .map(|c| {
                let value = row.get(&c.name).cloned().unwrap_or(ScalarValue::Null);
                (c.name.clone(), value)
            })
            .collect();
        target.rows.push(shaped);
        Ok(())
    }

    pub fn insert_feature_rows(&self, rows: Vec<FeatureRow>) -> Result<(), StorageError> {
        for FeatureRow { feature, row } in rows {
            self.insert(&feature, row)?;
        }
        Ok(())
    }

    pub fn add_node(&self, node: Node) {
        self.nodes.write().push(node);
    }

    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.tables.read().get(table).map(|t| t.rows.len())
    }
}

impl SchemaProvider for MemoryStore {
    fn describe(&self, table: &str) -> Result<TableDescriptor, SchemaError> {
        self.tables
            .read()
            .get(table)
            .map(|t| t.descriptor.clone())
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))
    }
}

impl QueryExecutor for MemoryStore {
    fn execute_filter(&self, query: &RecordQuery) -> Result<Vec<Row>, StorageError> {
        let tables = self.tables.read();
        let table = tables
            .get(&query.table)
            .ok_or_else(|| StorageError::UnknownTable(query.table.clone()))?;

        let matched: Vec<Row> = table
            .rows
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        debug!(
            target: "opendata_query::storage",
            table = %query.table,
            matched = matched.len(),
            "Filtered rows"
        );
        Ok(query.window.apply(matched))
    }

    fn execute_aggregate(
        &self,
        select: &AggregateSelect,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<AggregateRow>, StorageError> {
        let tables = self.tables.read();
        let table = tables
            .get(&select.table)
            .ok_or_else(|| StorageError::UnknownTable(select.table.clone()))?;

        let mut groups: BTreeMap<NaiveDateTime, Vec<&Row>> = BTreeMap::new();
        for row in &table.rows {
            let Some(ts) = row.get(TIME_COLUMN).and_then(ScalarValue::as_timestamp) else {
                continue;
            };
            if ts < window_start || ts >= window_end || !selected(select, row) {
                continue;
            }
            groups.entry(truncate(ts, select.unit)).or_default().push(row);
        }

        Ok(groups
            .into_iter()
            .map(|(time_bucket, rows)| AggregateRow {
                time_bucket,
                columns: select
                    .columns
                    .iter()
                    .map(|column| {
                        let values: Vec<f64> = rows
                            .iter()
                            .filter_map(|r| r.get(column).and_then(ScalarValue::as_f64))
                            .collect();
                        let stat = ColumnStat {
                            value: select.function.apply(&values),
                            count: values.len() as u64,
                        };
                        (column.clone(), stat)
                    })
                    .collect(),
            })
            .collect())
    }
}

fn text_matches(row: &Row, column: &str, wanted: &str) -> bool {
    matches!(row.get(column), Some(ScalarValue::Utf8(v)) if v.eq_ignore_ascii_case(wanted))
}

fn selected(select: &AggregateSelect, row: &Row) -> bool {
    let node_ok = select
        .node_id
        .as_deref()
        .is_none_or(|id| text_matches(row, "node_id", id));
    let sensor_ok = select
        .sensors
        .as_ref()
        .is_none_or(|sensors| sensors.iter().any(|s| text_matches(row, "sensor", s)));
    node_ok && sensor_ok
}

impl NodeCatalog for MemoryStore {
    fn get_node(&self, id: &str) -> Result<Option<Node>, StorageError> {
        Ok(self
            .nodes
            .read()
            .iter()
            .find(|n| n.id.eq_ignore_ascii_case(id))
            .cloned())
    }

    fn nodes(&self) -> Result<Vec<Node>, StorageError> {
        Ok(self.nodes.read().clone())
    }
}
