use crate::engine::geo::GeometryError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single problem with one query parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("'{0}' is not a valid field name")]
    InvalidField(String),

    #[error("'{0}' is not a valid query operator")]
    InvalidOperator(String),

    #[error("'{value}' is not a valid value for '{field}'")]
    InvalidValue { field: String, value: String },

    #[error("Malformed geometry for '{field}': {source}")]
    MalformedGeometry {
        field: String,
        #[source]
        source: GeometryError,
    },

    #[error("Operator '{operator}' cannot be applied to '{field}'")]
    IncompatibleOperator { field: String, operator: String },
}

impl FilterError {
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, FilterError::InvalidField(_))
    }
}

/// The parameter an error came from, paired with the error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamError {
    pub param: String,
    pub error: FilterError,
}

impl Serialize for ParamError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ParamError", 2)?;
        s.serialize_field("param", &self.param)?;
        s.serialize_field("message", &self.error.to_string())?;
        s.end()
    }
}

/// Every validation problem found while scanning a request, in parameter
/// order. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    errors: Vec<ParamError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: impl Into<String>, error: FilterError) {
        self.errors.push(ParamError {
            param: param.into(),
            error,
        });
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message a single-line response shows: the first bad field name
    /// wins over any other error.
    pub fn headline(&self) -> Option<String> {
        self.errors
            .iter()
            .find(|e| e.error.is_invalid_field())
            .or_else(|| self.errors.first())
            .map(|e| e.error.to_string())
    }

    /// One message per offending parameter.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.errors
            .iter()
            .map(|e| (e.param.clone(), e.error.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.headline() {
            Some(headline) if self.errors.len() > 1 => {
                write!(f, "{headline} (and {} more)", self.errors.len() - 1)
            }
            Some(headline) => f.write_str(&headline),
            None => f.write_str("valid"),
        }
    }
}

impl std::error::Error for ValidationReport {}
