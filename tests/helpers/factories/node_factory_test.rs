use super::node_factory::NodeFactory;

#[test]
fn default_sensors_cover_two_features() {
    let node = NodeFactory::new("n1").with_default_sensors().create();

    assert_eq!(node.network, "array_of_things");
    assert_eq!(node.sensors.len(), 2);
    let features: Vec<&str> = node.sensors.iter().flat_map(|s| s.features()).collect();
    assert_eq!(features, vec!["temperature", "magnetic_field", "magnetic_field", "magnetic_field"]);
}
