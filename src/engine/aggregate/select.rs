use super::function::AggregateFunction;
use crate::engine::filter::SqlFragment;
use crate::engine::filter::clause::{bind, quote_ident};
use crate::engine::schema::{ColumnType, TableDescriptor};
use crate::engine::types::ScalarValue;
use crate::shared::datetime::TimeUnit;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Key columns of a feature-of-interest table; never aggregated.
pub const META_COLUMNS: [&str; 4] = ["node_id", "datetime", "meta_id", "sensor"];

/// Column the bucket label is truncated from.
pub const TIME_COLUMN: &str = "datetime";

/// The grouped select run once per bucket window.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSelect {
    pub table: String,
    pub node_id: Option<String>,
    pub sensors: Option<Vec<String>>,
    pub unit: TimeUnit,
    pub function: AggregateFunction,
    /// Aggregated columns in table order
    pub columns: Vec<String>,
}

impl AggregateSelect {
    /// Keep the double precision columns of `table` that are eligible and
    /// not key columns.
    pub fn build(
        table: &TableDescriptor,
        eligible: &BTreeSet<String>,
        function: AggregateFunction,
        unit: TimeUnit,
    ) -> Self {
        let columns = table
            .columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Float)
            .filter(|c| !META_COLUMNS.contains(&c.name.as_str()))
            .filter(|c| eligible.contains(&c.name.to_lowercase()))
            .map(|c| c.name.clone())
            .collect();

        Self {
            table: table.name.clone(),
            node_id: None,
            sensors: None,
            unit,
            function,
            columns,
        }
    }

    pub fn for_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_sensors(mut self, sensors: Option<Vec<String>>) -> Self {
        self.sensors = sensors;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// PostgreSQL for one window `[window_start, window_end)`.
    pub fn to_sql(&self, window_start: NaiveDateTime, window_end: NaiveDateTime) -> SqlFragment {
        let mut params = Vec::new();
        let time = quote_ident(TIME_COLUMN);

        let mut selects = vec![format!(
            "date_trunc('{}', {time}) AS time_bucket",
            self.unit.as_str()
        )];
        for column in &self.columns {
            let quoted = quote_ident(column);
            selects.push(format!(
                "{}({quoted}) AS {quoted}",
                self.function.sql_name()
            ));
            selects.push(format!(
                "count({quoted}) AS {}",
                quote_ident(&format!("{column}_count"))
            ));
        }

        let mut conditions = Vec::new();
        if let Some(node_id) = &self.node_id {
            let p = bind(&mut params, ScalarValue::Utf8(node_id.clone()));
            conditions.push(format!("{} = {p}", quote_ident("node_id")));
        }
        if let Some(sensors) = &self.sensors {
            let placeholders: Vec<String> = sensors
                .iter()
                .map(|s| bind(&mut params, ScalarValue::Utf8(s.clone())))
                .collect();
            conditions.push(format!(
                "{} IN ({})",
                quote_ident("sensor"),
                placeholders.join(", ")
            ));
        }
        let lower = bind(&mut params, ScalarValue::Timestamp(window_start));
        let upper = bind(&mut params, ScalarValue::Timestamp(window_end));
        conditions.push(format!("{time} >= {lower} AND {time} < {upper}"));

        SqlFragment {
            sql: format!(
                "SELECT {} FROM {} WHERE {} GROUP BY time_bucket ORDER BY time_bucket",
                selects.join(", "),
                quote_ident(&self.table),
                conditions.join(" AND ")
            ),
            params,
        }
    }
}

/// Statistic and non-null count for one column of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStat {
    pub value: Option<f64>,
    pub count: u64,
}

/// One group as returned by the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub time_bucket: NaiveDateTime,
    pub columns: IndexMap<String, ColumnStat>,
}
