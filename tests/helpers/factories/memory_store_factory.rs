use super::node_factory::NodeFactory;
use super::row_factory::RowFactory;
use super::table_descriptor_factory::TableDescriptorFactory;
use crate::engine::sensor::Node;
use crate::engine::storage::MemoryStore;
use crate::engine::types::Row;
use chrono::NaiveDateTime;

pub struct MemoryStoreFactory {
    store: MemoryStore,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn with_node(self, node: Node) -> Self {
        self.store.add_node(node);
        self
    }

    pub fn with_feature_table(self, feature: &str, properties: &[&str]) -> Self {
        self.store
            .create_table(TableDescriptorFactory::feature_table(feature, properties).create());
        self
    }

    pub fn with_row(self, table: &str, row: Row) -> Self {
        self.store.insert(table, row).expect("table exists");
        self
    }

    /// One observation of `property` by `sensor` on `node_id`.
    pub fn with_observation(
        self,
        feature: &str,
        node_id: &str,
        sensor: &str,
        datetime: NaiveDateTime,
        property: &str,
        value: f64,
    ) -> Self {
        let row = RowFactory::new()
            .with("node_id", node_id)
            .with("datetime", datetime)
            .with("meta_id", "1")
            .with("sensor", sensor)
            .with(property, value)
            .create();
        self.with_row(feature, row)
    }

    /// Node `0000001e0610ba72` with the default sensors and empty
    /// `temperature` and `magnetic_field` tables.
    pub fn sensor_network() -> Self {
        Self::new()
            .with_node(
                NodeFactory::new("0000001e0610ba72")
                    .at(-87.6298, 41.8781)
                    .with_default_sensors()
                    .create(),
            )
            .with_feature_table("temperature", &["temperature"])
            .with_feature_table("magnetic_field", &["x", "y", "z"])
    }

    pub fn create(self) -> MemoryStore {
        self.store
    }
}
