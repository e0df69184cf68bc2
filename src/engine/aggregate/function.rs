use crate::engine::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistic computed per column per bucket. `Std` and `Var` are sample
/// statistics, matching SQL `stddev` / `variance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    #[default]
    Avg,
    Std,
    Var,
}

impl AggregateFunction {
    /// Key the statistic is reported under.
    pub fn label(&self) -> &'static str {
        match self {
            AggregateFunction::Avg => "avg",
            AggregateFunction::Std => "std",
            AggregateFunction::Var => "var",
        }
    }

    pub fn sql_name(&self) -> &'static str {
        match self {
            AggregateFunction::Avg => "avg",
            AggregateFunction::Std => "stddev",
            AggregateFunction::Var => "variance",
        }
    }

    /// Evaluate over the non-null values of one group. `None` where SQL
    /// would return NULL: no values, or fewer than two for a sample
    /// statistic.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        match self {
            AggregateFunction::Avg => mean(values),
            AggregateFunction::Var => sample_variance(values),
            AggregateFunction::Std => sample_variance(values).map(f64::sqrt),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AggregateFunction {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg" => Ok(AggregateFunction::Avg),
            "std" => Ok(AggregateFunction::Std),
            "var" => Ok(AggregateFunction::Var),
            _ => Err(FilterError::InvalidValue {
                field: "function".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
