use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;

/// A row keyed by column name, in the table's column order.
pub type Row = IndexMap<String, ScalarValue>;

/// A typed cell or operand.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Timestamp(NaiveDateTime),
    Utf8(String),
    /// GeoJSON geometry object
    Geometry(JsonValue),
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Int64(i) => Some(*i as f64),
            ScalarValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            ScalarValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Native ordering between two values of compatible types.
    ///
    /// Integers and floats compare numerically with each other. Nulls and
    /// mismatched types are unordered.
    pub fn compare(&self, other: &ScalarValue) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => Some(a.cmp(b)),
            (ScalarValue::Int64(a), ScalarValue::Int64(b)) => Some(a.cmp(b)),
            (ScalarValue::Timestamp(a), ScalarValue::Timestamp(b)) => Some(a.cmp(b)),
            (ScalarValue::Utf8(a), ScalarValue::Utf8(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Timestamp(ts) => {
                JsonValue::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
            ScalarValue::Geometry(g) => g.clone(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("null"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
            ScalarValue::Int64(i) => write!(f, "{i}"),
            ScalarValue::Float64(v) => write!(f, "{v}"),
            ScalarValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            ScalarValue::Utf8(s) => f.write_str(s),
            ScalarValue::Geometry(g) => write!(f, "{g}"),
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::Null => serializer.serialize_unit(),
            ScalarValue::Boolean(b) => serializer.serialize_bool(*b),
            ScalarValue::Int64(i) => serializer.serialize_i64(*i),
            ScalarValue::Float64(f) => serializer.serialize_f64(*f),
            ScalarValue::Timestamp(_) | ScalarValue::Utf8(_) | ScalarValue::Geometry(_) => {
                self.to_json().serialize(serializer)
            }
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int64(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float64(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Boolean(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Utf8(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Utf8(v)
    }
}

impl From<NaiveDateTime> for ScalarValue {
    fn from(v: NaiveDateTime) -> Self {
        ScalarValue::Timestamp(v)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ScalarValue::Null)
    }
}
