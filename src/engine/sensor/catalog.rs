use super::types::Node;
use crate::engine::errors::QueryError;
use crate::engine::geo::haversine_meters;
use crate::engine::storage::{NodeCatalog, StorageError};
use std::collections::BTreeSet;

/// Distinct network names, lowercased.
pub fn networks(catalog: &dyn NodeCatalog) -> Result<Vec<String>, StorageError> {
    let names: BTreeSet<String> = catalog
        .nodes()?
        .iter()
        .map(|n| n.network.to_lowercase())
        .collect();
    Ok(names.into_iter().collect())
}

pub fn node_ids(
    catalog: &dyn NodeCatalog,
    network: Option<&str>,
) -> Result<Vec<String>, StorageError> {
    Ok(catalog
        .nodes()?
        .iter()
        .filter(|n| n.is_on(network))
        .map(|n| n.id.to_lowercase())
        .collect())
}

/// Features declared by any sensor on the network's nodes.
pub fn features(
    catalog: &dyn NodeCatalog,
    network: Option<&str>,
) -> Result<Vec<String>, StorageError> {
    let nodes = catalog.nodes()?;
    let features: BTreeSet<String> = nodes
        .iter()
        .filter(|n| n.is_on(network))
        .flat_map(|n| n.sensors.iter())
        .flat_map(|s| s.features())
        .map(str::to_lowercase)
        .collect();
    Ok(features.into_iter().collect())
}

pub fn sensors(
    catalog: &dyn NodeCatalog,
    network: Option<&str>,
) -> Result<Vec<String>, StorageError> {
    let nodes = catalog.nodes()?;
    let names: BTreeSet<String> = nodes
        .iter()
        .filter(|n| n.is_on(network))
        .flat_map(|n| n.sensors.iter())
        .map(|s| s.name.to_lowercase())
        .collect();
    Ok(names.into_iter().collect())
}

/// The closest other located node by great-circle distance. `None` when
/// the node or every other node lacks a location.
pub fn nearest_neighbor(
    catalog: &dyn NodeCatalog,
    node_id: &str,
) -> Result<Option<Node>, QueryError> {
    let node = catalog
        .get_node(node_id)?
        .ok_or_else(|| QueryError::NodeNotFound(node_id.to_string()))?;
    let Some(origin) = node.location else {
        return Ok(None);
    };

    let nearest = catalog
        .nodes()?
        .into_iter()
        .filter(|n| !n.id.eq_ignore_ascii_case(&node.id))
        .filter_map(|n| n.location.map(|loc| (haversine_meters(origin, loc), n)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, n)| n);
    Ok(nearest)
}
