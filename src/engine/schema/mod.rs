pub mod errors;
pub mod provider;
pub mod types;

pub use errors::SchemaError;
pub use provider::{CachedSchemaProvider, SchemaProvider};
pub use types::{ColumnDescriptor, ColumnType, TableDescriptor};
