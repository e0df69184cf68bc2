use super::operator::CompareOp;
use crate::engine::geo::{Geometry, NormalizedGeometry};
use crate::engine::types::{Row, ScalarValue};
use chrono::Timelike;
use std::fmt;

/// Predicate applied to a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `ScalarValue::Null` as the value means "is null" / "is not null"
    Compare { op: CompareOp, value: ScalarValue },
    In { values: Vec<ScalarValue> },
    Within { geometry: NormalizedGeometry },
    HourOfDay { op: CompareOp, hour: u32 },
}

/// One validated `(column, operator, operand)` predicate. A request's
/// clauses are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub column: String,
    pub predicate: Predicate,
}

impl FilterClause {
    pub fn new(column: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            column: column.into(),
            predicate,
        }
    }

    /// Evaluate against an in-memory row with SQL null semantics: a null
    /// cell only matches an explicit null test.
    pub fn matches(&self, row: &Row) -> bool {
        let cell = row.get(&self.column).unwrap_or(&ScalarValue::Null);
        match &self.predicate {
            Predicate::Compare {
                op,
                value: ScalarValue::Null,
            } => match op {
                CompareOp::Eq => cell.is_null(),
                CompareOp::Ne => !cell.is_null(),
                _ => false,
            },
            Predicate::Compare { op, value } => cell
                .compare(value)
                .map(|ordering| op.matches(ordering))
                .unwrap_or(false),
            Predicate::In { values } => values
                .iter()
                .any(|v| cell.compare(v) == Some(std::cmp::Ordering::Equal)),
            Predicate::Within { geometry } => match cell {
                ScalarValue::Geometry(json) => Geometry::from_json(json)
                    .map(|g| g.within(&geometry.shape))
                    .unwrap_or(false),
                _ => false,
            },
            Predicate::HourOfDay { op, hour } => cell
                .as_timestamp()
                .map(|ts| op.matches(ts.hour().cmp(hour)))
                .unwrap_or(false),
        }
    }

    /// Render as a PostgreSQL/PostGIS boolean expression, appending bound
    /// values to `params` and referring to them as `$n`.
    pub fn to_sql(&self, params: &mut Vec<ScalarValue>) -> String {
        let column = quote_ident(&self.column);
        match &self.predicate {
            Predicate::Compare {
                op: CompareOp::Eq,
                value: ScalarValue::Null,
            } => format!("{column} IS NULL"),
            Predicate::Compare {
                op: CompareOp::Ne,
                value: ScalarValue::Null,
            } => format!("{column} IS NOT NULL"),
            Predicate::Compare { op, value } => {
                let placeholder = bind(params, value.clone());
                format!("{column} {} {placeholder}", op.sql_symbol())
            }
            Predicate::In { values } if values.is_empty() => "FALSE".to_string(),
            Predicate::In { values } => {
                let placeholders: Vec<String> =
                    values.iter().map(|v| bind(params, v.clone())).collect();
                format!("{column} IN ({})", placeholders.join(", "))
            }
            Predicate::Within { geometry } => {
                let placeholder = bind(params, ScalarValue::Utf8(geometry.to_geojson_string()));
                format!("ST_Within({column}, ST_GeomFromGeoJSON({placeholder}))")
            }
            Predicate::HourOfDay { op, hour } => {
                let placeholder = bind(params, ScalarValue::Int64(*hour as i64));
                format!(
                    "date_part('hour', {column}) {} {placeholder}",
                    op.sql_symbol()
                )
            }
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Compare { op, value } => write!(f, "{} {} {}", self.column, op, value),
            Predicate::In { values } => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{} IN ({})", self.column, list.join(", "))
            }
            Predicate::Within { geometry } => {
                write!(f, "{} WITHIN {}", self.column, geometry.shape.type_name())
            }
            Predicate::HourOfDay { op, hour } => {
                write!(f, "hour({}) {} {}", self.column, op, hour)
            }
        }
    }
}

/// SQL text with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<ScalarValue>,
}

/// AND together every clause. No clauses renders as `TRUE`.
pub fn render_where(clauses: &[FilterClause]) -> SqlFragment {
    let mut params = Vec::new();
    let parts: Vec<String> = clauses.iter().map(|c| c.to_sql(&mut params)).collect();
    let sql = if parts.is_empty() {
        "TRUE".to_string()
    } else {
        parts.join(" AND ")
    };
    SqlFragment { sql, params }
}

pub(crate) fn bind(params: &mut Vec<ScalarValue>, value: ScalarValue) -> String {
    params.push(value);
    format!("${}", params.len())
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
