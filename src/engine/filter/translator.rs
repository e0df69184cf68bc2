use super::clause::{FilterClause, Predicate};
use super::errors::{FilterError, ValidationReport};
use super::operator::{CompareOp, Operator, split_key};
use super::params::QueryParams;
use crate::engine::geo::{GeometryOptions, parse_operand};
use crate::engine::schema::{ColumnDescriptor, ColumnType, TableDescriptor};
use crate::engine::types::ScalarValue;
use crate::shared::config::CONFIG;
use crate::shared::datetime::TimeParser;
use tracing::debug;

/// Keys that never name a filter column.
pub const PAGING_KEYS: [&str; 3] = ["offset", "limit", "order_by"];

/// Literal operand meaning "no value".
pub const NULL_SENTINEL: &str = "null";

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorOptions {
    /// Paging keys plus caller-specific passthroughs, skipped by `translate`
    pub reserved_keys: Vec<String>,
    pub response_limit: usize,
    pub geometry: GeometryOptions,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        let mut reserved_keys: Vec<String> = PAGING_KEYS.iter().map(|k| k.to_string()).collect();
        reserved_keys.push("weather".to_string());
        Self {
            reserved_keys,
            response_limit: 1000,
            geometry: GeometryOptions::default(),
        }
    }
}

impl TranslatorOptions {
    pub fn from_config() -> Self {
        let mut reserved_keys: Vec<String> = PAGING_KEYS.iter().map(|k| k.to_string()).collect();
        reserved_keys.extend(CONFIG.query.passthrough_keys.iter().cloned());
        Self {
            reserved_keys,
            response_limit: CONFIG.query.response_limit,
            geometry: GeometryOptions::from_config(),
        }
    }

    pub fn with_passthrough(mut self, key: impl Into<String>) -> Self {
        self.reserved_keys.push(key.into());
        self
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.iter().any(|k| k == key)
    }
}

/// Outcome of translating a request's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    clauses: Vec<FilterClause>,
    report: ValidationReport,
}

impl Translation {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Clauses are only handed out when every parameter translated.
    pub fn clauses(&self) -> Option<&[FilterClause]> {
        self.is_valid().then_some(self.clauses.as_slice())
    }

    pub fn into_clauses(self) -> Result<Vec<FilterClause>, ValidationReport> {
        if self.report.is_valid() {
            Ok(self.clauses)
        } else {
            Err(self.report)
        }
    }
}

/// Translate raw parameters into clauses against `table`.
///
/// Parameters are scanned in arrival order. A failing parameter records its
/// error and scanning moves on, so one response can list every mistake.
pub fn translate(
    table: &TableDescriptor,
    params: &QueryParams,
    opts: &TranslatorOptions,
) -> Translation {
    let mut clauses = Vec::new();
    let mut report = ValidationReport::new();

    for (key, raw) in params.iter() {
        if opts.is_reserved(key) {
            continue;
        }
        match translate_param(table, key, raw, opts) {
            Ok(clause) => {
                debug!(target: "opendata_query::filter", table = %table.name, %clause, "Translated parameter");
                clauses.push(clause);
            }
            Err(error) => {
                debug!(target: "opendata_query::filter", table = %table.name, key, %error, "Rejected parameter");
                report.push(key, error);
            }
        }
    }

    Translation { clauses, report }
}

fn translate_param(
    table: &TableDescriptor,
    key: &str,
    raw: &str,
    opts: &TranslatorOptions,
) -> Result<FilterClause, FilterError> {
    let (field, suffix) = split_key(key);
    let column = table
        .column(field)
        .ok_or_else(|| FilterError::InvalidField(field.to_string()))?;
    let operator = match suffix {
        Some(s) => s.parse::<Operator>()?,
        None => Operator::default(),
    };

    let predicate = match operator {
        Operator::Compare(op) => Predicate::Compare {
            op,
            value: coerce_or_null(column, raw)?,
        },
        Operator::In => Predicate::In {
            values: split_list(raw)
                .map(|item| coerce(column, item))
                .collect::<Result<Vec<_>, _>>()?,
        },
        Operator::Within => {
            require_type(column, operator, ColumnType::Geometry)?;
            let geometry = parse_operand(raw, &opts.geometry).map_err(|source| {
                FilterError::MalformedGeometry {
                    field: column.name.clone(),
                    source,
                }
            })?;
            Predicate::Within { geometry }
        }
        Operator::TimeOfDayGe => hour_predicate(column, operator, raw, CompareOp::Ge)?,
        Operator::TimeOfDayLe => hour_predicate(column, operator, raw, CompareOp::Le)?,
    };

    Ok(FilterClause::new(column.name.clone(), predicate))
}

/// Comma separated operand; an empty operand is an empty list.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(move |_| !raw.is_empty())
}

fn hour_predicate(
    column: &ColumnDescriptor,
    operator: Operator,
    raw: &str,
    op: CompareOp,
) -> Result<Predicate, FilterError> {
    require_type(column, operator, ColumnType::Timestamp)?;
    let hour = raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h < 24)
        .ok_or_else(|| invalid_value(column, raw))?;
    Ok(Predicate::HourOfDay { op, hour })
}

fn require_type(
    column: &ColumnDescriptor,
    operator: Operator,
    expected: ColumnType,
) -> Result<(), FilterError> {
    if column.column_type == expected {
        Ok(())
    } else {
        Err(FilterError::IncompatibleOperator {
            field: column.name.clone(),
            operator: operator.to_string(),
        })
    }
}

fn coerce_or_null(column: &ColumnDescriptor, raw: &str) -> Result<ScalarValue, FilterError> {
    if raw == NULL_SENTINEL {
        return Ok(ScalarValue::Null);
    }
    coerce(column, raw)
}

/// Convert a raw operand to the column's native type.
pub fn coerce(column: &ColumnDescriptor, raw: &str) -> Result<ScalarValue, FilterError> {
    let trimmed = raw.trim();
    let value = match column.column_type {
        ColumnType::Text => Some(ScalarValue::Utf8(raw.to_string())),
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(ScalarValue::Int64)
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().map(ScalarValue::Float64)),
        ColumnType::Float => trimmed.parse::<f64>().ok().map(ScalarValue::Float64),
        ColumnType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" => Some(ScalarValue::Boolean(true)),
            "false" | "f" | "0" | "no" => Some(ScalarValue::Boolean(false)),
            _ => None,
        },
        ColumnType::Timestamp => TimeParser::parse_naive(trimmed).map(ScalarValue::Timestamp),
        ColumnType::Geometry => serde_json::from_str::<serde_json::Value>(trimmed)
            .ok()
            .filter(|v| v.is_object())
            .map(ScalarValue::Geometry),
    };
    value
        .filter(|v| !matches!(v, ScalarValue::Float64(f) if !f.is_finite()))
        .ok_or_else(|| invalid_value(column, raw))
}

fn invalid_value(column: &ColumnDescriptor, raw: &str) -> FilterError {
    FilterError::InvalidValue {
        field: column.name.clone(),
        value: raw.to_string(),
    }
}
