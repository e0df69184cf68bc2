use super::types::{Sensor, split_mapping};
use serde_json::json;

#[test]
fn mapping_splits_on_first_separator() {
    assert_eq!(split_mapping("magnetic_field.x"), Some(("magnetic_field", "x")));
    assert_eq!(split_mapping("a.b.c"), Some(("a", "b.c")));
    assert_eq!(split_mapping("temperature"), None);
    assert_eq!(split_mapping(".x"), None);
    assert_eq!(split_mapping("x."), None);
}

#[test]
fn malformed_mappings_are_left_out() {
    let sensor = Sensor::new("bmp180")
        .with_property("Pressure", "atmospheric_pressure.pressure")
        .with_property("Broken", "nodot");

    let mappings: Vec<_> = sensor.mappings().collect();
    assert_eq!(
        mappings,
        vec![("Pressure", "atmospheric_pressure", "pressure")]
    );
}

#[test]
fn sensor_deserializes_without_info() {
    let sensor: Sensor = serde_json::from_value(json!({
        "name": "tmp112",
        "observed_properties": {"Temperature": "temperature.temperature"}
    }))
    .unwrap();

    assert_eq!(sensor.name, "tmp112");
    assert!(sensor.info.is_null());
    assert_eq!(
        sensor.observed_properties.get("Temperature").map(String::as_str),
        Some("temperature.temperature")
    );
}
