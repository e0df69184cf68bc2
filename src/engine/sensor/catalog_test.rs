use super::catalog::{features, nearest_neighbor, networks, node_ids, sensors};
use crate::engine::errors::QueryError;
use crate::engine::storage::MemoryStore;
use crate::test_helpers::factories::{MemoryStoreFactory, NodeFactory, SensorFactory};

fn store() -> MemoryStore {
    MemoryStoreFactory::new()
        .with_node(
            NodeFactory::new("Loop")
                .at(-87.6298, 41.8781)
                .with_default_sensors()
                .create(),
        )
        .with_node(
            NodeFactory::new("Hyde_Park")
                .at(-87.5907, 41.7943)
                .with_default_sensors()
                .create(),
        )
        .with_node(
            NodeFactory::new("Evanston")
                .on("Northwestern")
                .at(-87.6877, 42.0451)
                .with_sensor(
                    SensorFactory::new("HTU21D")
                        .maps("Humidity", "relative_humidity.humidity")
                        .create(),
                )
                .create(),
        )
        .with_node(NodeFactory::new("Unplaced").create())
        .create()
}

#[test]
fn networks_are_distinct_and_lowercase() {
    assert_eq!(
        networks(&store()).unwrap(),
        vec!["array_of_things".to_string(), "northwestern".to_string()]
    );
}

#[test]
fn node_ids_by_network() {
    let store = store();
    assert_eq!(node_ids(&store, Some("NorthWestern")).unwrap(), vec!["evanston"]);
    assert_eq!(node_ids(&store, None).unwrap().len(), 4);
}

#[test]
fn features_and_sensors_per_network() {
    let store = store();

    assert_eq!(
        features(&store, Some("array_of_things")).unwrap(),
        vec!["magnetic_field", "temperature"]
    );
    assert_eq!(
        features(&store, None).unwrap(),
        vec!["magnetic_field", "relative_humidity", "temperature"]
    );
    assert_eq!(sensors(&store, Some("northwestern")).unwrap(), vec!["htu21d"]);
}

#[test]
fn nearest_neighbor_skips_itself_and_unlocated_nodes() {
    let store = store();

    let nearest = nearest_neighbor(&store, "loop").unwrap().unwrap();
    assert_eq!(nearest.id, "Hyde_Park");

    assert!(nearest_neighbor(&store, "Unplaced").unwrap().is_none());
}

#[test]
fn nearest_neighbor_of_unknown_node() {
    assert!(matches!(
        nearest_neighbor(&store(), "ghost"),
        Err(QueryError::NodeNotFound(_))
    ));
}
