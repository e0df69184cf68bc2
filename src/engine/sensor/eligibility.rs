use super::types::split_mapping;
use crate::engine::errors::QueryError;
use crate::engine::storage::NodeCatalog;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Requested features, each optionally narrowed to some of its
/// properties. `None` means every property of the feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFilter {
    features: IndexMap<String, Option<BTreeSet<String>>>,
}

impl FeatureFilter {
    /// Parse `temperature,magnetic_field.x,magnetic_field.y`. A bare
    /// feature anywhere in the list widens it to all of its properties.
    pub fn parse(raw: &str) -> Self {
        let mut features: IndexMap<String, Option<BTreeSet<String>>> = IndexMap::new();
        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let item = item.to_lowercase();
            match split_mapping(&item) {
                Some((feature, property)) => {
                    let entry = features
                        .entry(feature.to_string())
                        .or_insert_with(|| Some(BTreeSet::new()));
                    if let Some(properties) = entry {
                        properties.insert(property.to_string());
                    }
                }
                None => {
                    features.insert(item, None);
                }
            }
        }
        Self { features }
    }

    /// The feature whose table is aggregated: the first one listed.
    pub fn primary_feature(&self) -> Option<&str> {
        self.features.keys().next().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains_key(&feature.to_lowercase())
    }

    pub fn properties(&self, feature: &str) -> Option<&BTreeSet<String>> {
        self.features
            .get(&feature.to_lowercase())
            .and_then(Option::as_ref)
    }

    pub fn allows(&self, feature: &str, property: &str) -> bool {
        match self.features.get(&feature.to_lowercase()) {
            None => false,
            Some(None) => true,
            Some(Some(properties)) => properties.contains(&property.to_lowercase()),
        }
    }
}

/// Lowercase property columns of `node_id` that match the feature filter,
/// restricted to `sensor_filter` when one is given.
pub fn resolve(
    catalog: &dyn NodeCatalog,
    node_id: &str,
    sensor_filter: Option<&[String]>,
    features: &FeatureFilter,
) -> Result<BTreeSet<String>, QueryError> {
    let node = catalog
        .get_node(node_id)?
        .ok_or_else(|| QueryError::NodeNotFound(node_id.to_string()))?;

    let mut columns = BTreeSet::new();
    for sensor in &node.sensors {
        if let Some(wanted) = sensor_filter {
            if !wanted.iter().any(|s| s.eq_ignore_ascii_case(&sensor.name)) {
                continue;
            }
        }
        for (key, mapping) in &sensor.observed_properties {
            let Some((feature, property)) = split_mapping(mapping) else {
                warn!(
                    target: "opendata_query::sensor",
                    sensor = %sensor.name,
                    key,
                    mapping,
                    "Skipping malformed observed property"
                );
                continue;
            };
            if features.allows(feature, property) {
                columns.insert(property.to_lowercase());
            }
        }
    }

    debug!(
        target: "opendata_query::sensor",
        node_id,
        columns = ?columns,
        "Resolved eligible columns"
    );
    Ok(columns)
}
