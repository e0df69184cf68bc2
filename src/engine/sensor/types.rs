use crate::engine::geo::Coord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator between feature and property in an observed-property mapping.
pub const MAPPING_SEPARATOR: char = '.';

/// A sensor model and the mapping from its raw payload keys to
/// `feature.property` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub name: String,
    pub observed_properties: IndexMap<String, String>,
    #[serde(default)]
    pub info: Value,
}

impl Sensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observed_properties: IndexMap::new(),
            info: Value::Null,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, mapping: impl Into<String>) -> Self {
        self.observed_properties.insert(key.into(), mapping.into());
        self
    }

    /// Every well-formed mapping as `(key, feature, property)`.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.observed_properties.iter().filter_map(|(key, mapping)| {
            split_mapping(mapping).map(|(feature, property)| (key.as_str(), feature, property))
        })
    }

    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.mappings().map(|(_, feature, _)| feature)
    }
}

/// Split `feature.property` on the first separator. Either side empty is
/// malformed.
pub fn split_mapping(mapping: &str) -> Option<(&str, &str)> {
    mapping
        .split_once(MAPPING_SEPARATOR)
        .filter(|(feature, property)| !feature.is_empty() && !property.is_empty())
}

/// A deployed node on a sensor network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub network: String,
    /// `[longitude, latitude]`
    pub location: Option<Coord>,
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub info: Value,
}

impl Node {
    pub fn new(id: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            network: network.into(),
            location: None,
            sensors: Vec::new(),
            info: Value::Null,
        }
    }

    pub fn at(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some([longitude, latitude]);
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn is_on(&self, network: Option<&str>) -> bool {
        network.is_none_or(|n| self.network.eq_ignore_ascii_case(n))
    }
}
