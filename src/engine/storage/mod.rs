pub mod errors;
pub mod memory;
pub mod traits;

pub use errors::StorageError;
pub use memory::MemoryStore;
pub use traits::{NodeCatalog, QueryExecutor};
