pub mod catalog;
pub mod eligibility;
pub mod routing;
pub mod types;

pub use catalog::{features, nearest_neighbor, networks, node_ids, sensors};
pub use eligibility::{FeatureFilter, resolve};
pub use routing::{
    FeatureRow, FeatureRows, RoutingError, UnknownObservation, recoverable, route_observation,
    route_unknown,
};
pub use types::{Node, Sensor, split_mapping};

#[cfg(test)]
mod catalog_test;
#[cfg(test)]
mod types_test;
