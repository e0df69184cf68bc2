pub mod aggregate;
pub mod errors;
pub mod filter;
pub mod geo;
pub mod schema;
pub mod sensor;
pub mod storage;
pub mod types;

pub use errors::QueryError;
