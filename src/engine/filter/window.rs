use super::clause::{FilterClause, SqlFragment, quote_ident, render_where};
use super::errors::{FilterError, ValidationReport};
use super::params::QueryParams;
use super::translator::{TranslatorOptions, translate};
use crate::engine::schema::TableDescriptor;
use crate::engine::types::Row;
use std::cmp::Ordering;
use std::fmt;

/// Columns tried, in order, when a request does not name a sort column.
const DEFAULT_ORDER_COLUMNS: [&str; 3] = ["date", "datetime", "obs_date"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Parse `column` or `column:asc|desc` against the table.
    fn parse(table: &TableDescriptor, raw: &str) -> Result<Self, FilterError> {
        let (column, direction) = match raw.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (raw, None),
        };
        if !table.has_column(column) {
            return Err(FilterError::InvalidField(column.to_string()));
        }
        let descending = match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(_) => {
                return Err(FilterError::InvalidValue {
                    field: "order_by".to_string(),
                    value: raw.to_string(),
                });
            }
        };
        Ok(Self {
            column: column.to_string(),
            descending,
        })
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let ordering = match (a.get(&self.column), b.get(&self.column)) {
            (Some(x), Some(y)) if !x.is_null() && !y.is_null() => {
                x.compare(y).unwrap_or(Ordering::Equal)
            }
            (Some(x), _) if !x.is_null() => return Ordering::Less,
            (_, Some(y)) if !y.is_null() => return Ordering::Greater,
            _ => Ordering::Equal,
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.descending { "DESC" } else { "ASC" };
        write!(f, "{} {direction}", quote_ident(&self.column))
    }
}

/// Paging and ordering of a record listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub offset: usize,
    pub limit: usize,
    pub order_by: Option<OrderBy>,
}

impl QueryWindow {
    pub fn new(limit: usize) -> Self {
        Self {
            offset: 0,
            limit,
            order_by: None,
        }
    }

    pub fn from_params(
        table: &TableDescriptor,
        params: &QueryParams,
        opts: &TranslatorOptions,
    ) -> Result<Self, ValidationReport> {
        let mut report = ValidationReport::new();

        let offset = match params.get("offset") {
            Some(raw) => parse_count(raw, "offset", 0)
                .map_err(|e| report.push("offset", e))
                .unwrap_or(0),
            None => 0,
        };

        let limit = match params.get("limit") {
            Some(raw) => parse_count(raw, "limit", 1)
                .map(|limit| limit.min(opts.response_limit))
                .map_err(|e| report.push("limit", e))
                .unwrap_or(opts.response_limit),
            None => opts.response_limit,
        };

        let order_by = match params.get("order_by") {
            Some(raw) => OrderBy::parse(table, raw)
                .map(Some)
                .map_err(|e| report.push("order_by", e))
                .unwrap_or(None),
            None => DEFAULT_ORDER_COLUMNS
                .iter()
                .find(|c| table.has_column(c))
                .map(|c| OrderBy::desc(*c)),
        };

        if report.is_valid() {
            Ok(Self {
                offset,
                limit,
                order_by,
            })
        } else {
            Err(report)
        }
    }

    /// Sort then page an in-memory result set. Nulls sort last.
    pub fn apply(&self, mut rows: Vec<Row>) -> Vec<Row> {
        if let Some(order) = &self.order_by {
            rows.sort_by(|a, b| order.compare(a, b));
        }
        rows.into_iter().skip(self.offset).take(self.limit).collect()
    }

    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        if let Some(order) = &self.order_by {
            sql.push_str(&format!("ORDER BY {order} NULLS LAST "));
        }
        sql.push_str(&format!("LIMIT {} OFFSET {}", self.limit, self.offset));
        sql
    }
}

fn parse_count(raw: &str, field: &str, min: usize) -> Result<usize, FilterError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= min)
        .ok_or_else(|| FilterError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// A fully validated record listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub table: String,
    pub clauses: Vec<FilterClause>,
    pub window: QueryWindow,
}

impl RecordQuery {
    /// Translate filters and window together; the report holds the problems
    /// of both.
    pub fn from_params(
        table: &TableDescriptor,
        params: &QueryParams,
        opts: &TranslatorOptions,
    ) -> Result<Self, ValidationReport> {
        let translation = translate(table, params, opts);
        let window = QueryWindow::from_params(table, params, opts);

        match (translation.into_clauses(), window) {
            (Ok(clauses), Ok(window)) => Ok(Self {
                table: table.name.clone(),
                clauses,
                window,
            }),
            (Err(mut report), Err(more)) => {
                report.extend(more);
                Err(report)
            }
            (Err(report), _) | (_, Err(report)) => Err(report),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.clauses.iter().all(|c| c.matches(row))
    }

    pub fn to_sql(&self) -> SqlFragment {
        let filter = render_where(&self.clauses);
        SqlFragment {
            sql: format!(
                "SELECT * FROM {} WHERE {} {}",
                quote_ident(&self.table),
                filter.sql,
                self.window.to_sql()
            ),
            params: filter.params,
        }
    }
}
