use super::errors::FilterError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Separator between a field name and its operator in a parameter key.
pub const OPERATOR_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn matches(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }

    pub fn sql_symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_symbol())
    }
}

/// The closed operator vocabulary accepted after `__` in a parameter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Compare(CompareOp),
    In,
    Within,
    TimeOfDayGe,
    TimeOfDayLe,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Compare(CompareOp::Eq),
        Operator::Compare(CompareOp::Ne),
        Operator::Compare(CompareOp::Lt),
        Operator::Compare(CompareOp::Le),
        Operator::Compare(CompareOp::Gt),
        Operator::Compare(CompareOp::Ge),
        Operator::In,
        Operator::Within,
        Operator::TimeOfDayGe,
        Operator::TimeOfDayLe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Compare(CompareOp::Eq) => "eq",
            Operator::Compare(CompareOp::Ne) => "ne",
            Operator::Compare(CompareOp::Lt) => "lt",
            Operator::Compare(CompareOp::Le) => "le",
            Operator::Compare(CompareOp::Gt) => "gt",
            Operator::Compare(CompareOp::Ge) => "ge",
            Operator::In => "in",
            Operator::Within => "within",
            Operator::TimeOfDayGe => "time_of_day_ge",
            Operator::TimeOfDayLe => "time_of_day_le",
        }
    }

    /// Comparison applied to the hour-of-day for the time-of-day operators.
    pub fn hour_comparison(&self) -> Option<CompareOp> {
        match self {
            Operator::TimeOfDayGe => Some(CompareOp::Ge),
            Operator::TimeOfDayLe => Some(CompareOp::Le),
            _ => None,
        }
    }
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Compare(CompareOp::Eq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::InvalidOperator(s.to_string()))
    }
}

/// Split `field__operator` on the first separator. A bare key carries no
/// operator and means equality.
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(OPERATOR_SEPARATOR) {
        Some((field, op)) => (field, Some(op)),
        None => (key, None),
    }
}
