use super::types::{Sensor, split_mapping};
use crate::engine::types::{Row, ScalarValue};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Property values grouped by the feature-of-interest table they belong to.
pub type FeatureRows = IndexMap<String, Vec<(String, Value)>>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("Observation payload must be a JSON object")]
    NotAnObject,

    #[error("Sensor '{sensor}' has no mapping for '{key}'")]
    UnmappedKey { sensor: String, key: String },

    #[error("Sensor '{sensor}' maps '{key}' to malformed '{mapping}'")]
    MalformedMapping {
        sensor: String,
        key: String,
        mapping: String,
    },
}

/// An observation parked because its sensor mapping was unknown at ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownObservation {
    pub node_id: String,
    pub datetime: NaiveDateTime,
    pub meta_id: String,
    pub sensor: String,
    pub data: Value,
}

/// A row destined for one feature-of-interest table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub feature: String,
    pub row: Row,
}

/// Split a flat payload into per-feature property lists.
pub fn route_observation(payload: &Value, sensor: &Sensor) -> Result<FeatureRows, RoutingError> {
    let object = payload.as_object().ok_or(RoutingError::NotAnObject)?;

    let mut routed = FeatureRows::new();
    for (key, value) in object {
        let mapping =
            sensor
                .observed_properties
                .get(key)
                .ok_or_else(|| RoutingError::UnmappedKey {
                    sensor: sensor.name.clone(),
                    key: key.clone(),
                })?;
        let (feature, property) =
            split_mapping(mapping).ok_or_else(|| RoutingError::MalformedMapping {
                sensor: sensor.name.clone(),
                key: key.clone(),
                mapping: mapping.clone(),
            })?;
        routed
            .entry(feature.to_string())
            .or_default()
            .push((property.to_string(), value.clone()));
    }
    Ok(routed)
}

/// Observations from `sensor` whose every key the sensor now maps.
pub fn recoverable<'a>(
    unknowns: &'a [UnknownObservation],
    sensor: &Sensor,
) -> Vec<&'a UnknownObservation> {
    unknowns
        .iter()
        .filter(|u| u.sensor.eq_ignore_ascii_case(&sensor.name))
        .filter(|u| match u.data.as_object() {
            Some(object) => object
                .keys()
                .all(|k| sensor.observed_properties.contains_key(k)),
            None => false,
        })
        .collect()
}

/// Build the feature table rows for a recovered observation: the key
/// columns followed by its properties.
pub fn route_unknown(
    unknown: &UnknownObservation,
    sensor: &Sensor,
) -> Result<Vec<FeatureRow>, RoutingError> {
    let routed = route_observation(&unknown.data, sensor)?;
    debug!(
        target: "opendata_query::sensor",
        node_id = %unknown.node_id,
        sensor = %unknown.sensor,
        features = routed.len(),
        "Routed unknown observation"
    );

    Ok(routed
        .into_iter()
        .map(|(feature, properties)| {
            let mut row = Row::new();
            row.insert("node_id".into(), ScalarValue::Utf8(unknown.node_id.clone()));
            row.insert("datetime".into(), ScalarValue::Timestamp(unknown.datetime));
            row.insert("meta_id".into(), ScalarValue::Utf8(unknown.meta_id.clone()));
            row.insert("sensor".into(), ScalarValue::Utf8(unknown.sensor.clone()));
            for (property, value) in properties {
                row.insert(property, json_scalar(value));
            }
            FeatureRow { feature, row }
        })
        .collect())
}

fn json_scalar(value: Value) -> ScalarValue {
    match value {
        Value::Null => ScalarValue::Null,
        Value::Bool(b) => ScalarValue::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) if !n.is_f64() => ScalarValue::Int64(i),
            _ => n.as_f64().map(ScalarValue::Float64).unwrap_or(ScalarValue::Null),
        },
        Value::String(s) => ScalarValue::Utf8(s),
        other => ScalarValue::Utf8(other.to_string()),
    }
}
