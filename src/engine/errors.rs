use crate::engine::filter::ValidationReport;
use crate::engine::schema::SchemaError;
use crate::engine::storage::StorageError;
use crate::shared::datetime::BucketError;
use thiserror::Error;
use tracing::{debug, error};

/// Errors surfaced by the query and aggregation entry points.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("No sensor on node '{node_id}' reports the requested features")]
    ContradictoryFilters { node_id: String },

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Not a valid date for '{param}': {value}")]
    InvalidDatetime { param: String, value: String },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("Bucket generation failed: {0}")]
    Bucket(#[from] BucketError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Schema error: {0}")]
    Schema(SchemaError),
}

impl From<SchemaError> for QueryError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::TableNotFound(table) => QueryError::TableNotFound(table),
            other => QueryError::Schema(other),
        }
    }
}

impl From<ValidationReport> for QueryError {
    fn from(report: ValidationReport) -> Self {
        QueryError::Validation(report)
    }
}

impl QueryError {
    pub fn log_error(&self) {
        match self {
            QueryError::TableNotFound(table) => {
                error!("Table not found: {}", table);
                debug!("Table lookup failed for '{}'", table);
            }
            QueryError::NodeNotFound(node) => {
                error!("Node not found: {}", node);
                debug!("Node lookup failed for '{}'", node);
            }
            QueryError::ContradictoryFilters { node_id } => {
                error!("Contradictory filters for node {}", node_id);
                debug!("Eligible column set was empty for node '{}'", node_id);
            }
            QueryError::MissingParameter(param) => {
                error!("Missing required parameter: {}", param);
                debug!("Request did not carry '{}'", param);
            }
            QueryError::InvalidDatetime { param, value } => {
                error!("Invalid datetime for {}", param);
                debug!("Unparseable datetime '{}' in '{}'", value, param);
            }
            QueryError::Validation(report) => {
                error!("Query validation failed: {}", report);
                debug!("Validation error details: {:?}", report.messages());
            }
            QueryError::Bucket(e) => {
                error!("Bucket generation failed: {}", e);
                debug!("Bucket error details: {:?}", e);
            }
            QueryError::Storage(e) => {
                error!("Storage error: {}", e);
                debug!("Storage error details: {:?}", e);
            }
            QueryError::Schema(e) => {
                error!("Schema error: {}", e);
                debug!("Schema error details: {:?}", e);
            }
        }
    }
}
