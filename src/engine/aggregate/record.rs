use super::function::AggregateFunction;
use super::select::{AggregateRow, ColumnStat};
use crate::shared::datetime::render_bucket_label;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One bucket of aggregation output. A record with no columns is the
/// placeholder for a window that held no observations.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord {
    pub time_bucket: NaiveDateTime,
    pub function: AggregateFunction,
    pub columns: IndexMap<String, ColumnStat>,
}

impl AggregateRecord {
    pub fn from_row(row: AggregateRow, function: AggregateFunction) -> Self {
        Self {
            time_bucket: row.time_bucket,
            function,
            columns: row.columns,
        }
    }

    pub fn placeholder(time_bucket: NaiveDateTime, function: AggregateFunction) -> Self {
        Self {
            time_bucket,
            function,
            columns: IndexMap::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn label(&self) -> String {
        render_bucket_label(self.time_bucket)
    }

    pub fn stat(&self, column: &str) -> Option<&ColumnStat> {
        self.columns.get(column)
    }
}

impl Serialize for AggregateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = if self.is_placeholder() { 1 } else { self.columns.len() };
        let mut map = serializer.serialize_map(Some(1 + extra))?;
        map.serialize_entry("time_bucket", &self.label())?;
        if self.is_placeholder() {
            map.serialize_entry("count", &0u64)?;
        }
        for (column, stat) in &self.columns {
            map.serialize_entry(
                column,
                &StatEntry {
                    label: self.function.label(),
                    stat,
                },
            )?;
        }
        map.end()
    }
}

struct StatEntry<'a> {
    label: &'static str,
    stat: &'a ColumnStat,
}

impl Serialize for StatEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.label, &self.stat.value)?;
        map.serialize_entry("count", &self.stat.count)?;
        map.end()
    }
}
