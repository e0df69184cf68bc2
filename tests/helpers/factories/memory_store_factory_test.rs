use super::memory_store_factory::MemoryStoreFactory;
use super::timestamp_factory::TimestampFactory;
use crate::engine::schema::SchemaProvider;
use crate::engine::storage::NodeCatalog;

#[test]
fn sensor_network_is_seeded() {
    let store = MemoryStoreFactory::sensor_network()
        .with_observation(
            "temperature",
            "0000001e0610ba72",
            "tmp112",
            TimestampFactory::naive(2016, 9, 20, 8, 0, 0),
            "temperature",
            21.5,
        )
        .create();

    assert!(store.get_node("0000001E0610BA72").unwrap().is_some());
    assert_eq!(store.describe("magnetic_field").unwrap().columns.len(), 7);
    assert_eq!(store.row_count("temperature"), Some(1));
}
