use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The name does not resolve to an existing relation
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The reflection call itself failed
    #[error("Schema backend error: {0}")]
    Backend(String),
}
