use super::errors::SchemaError;
use super::types::TableDescriptor;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Runtime reflection of table shapes.
pub trait SchemaProvider: Send + Sync {
    fn describe(&self, table: &str) -> Result<TableDescriptor, SchemaError>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Arc<P> {
    fn describe(&self, table: &str) -> Result<TableDescriptor, SchemaError> {
        (**self).describe(table)
    }
}

/// Keeps descriptors for the life of the process until told the schema
/// changed. Lookups that fail are not cached.
pub struct CachedSchemaProvider<P> {
    inner: P,
    cache: RwLock<HashMap<String, Arc<TableDescriptor>>>,
}

impl<P: SchemaProvider> CachedSchemaProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn describe_shared(&self, table: &str) -> Result<Arc<TableDescriptor>, SchemaError> {
        if let Some(hit) = self.cache.read().get(table) {
            return Ok(Arc::clone(hit));
        }

        let descriptor = Arc::new(self.inner.describe(table)?);
        debug!(target: "opendata_query::schema", table, "Cached table descriptor");
        self.cache
            .write()
            .entry(table.to_string())
            .or_insert_with(|| Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Drop one table after a schema change notification.
    pub fn invalidate(&self, table: &str) {
        self.cache.write().remove(table);
    }

    pub fn invalidate_all(&self) {
        self.cache.write().clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: SchemaProvider> SchemaProvider for CachedSchemaProvider<P> {
    fn describe(&self, table: &str) -> Result<TableDescriptor, SchemaError> {
        self.describe_shared(table).map(|d| (*d).clone())
    }
}
