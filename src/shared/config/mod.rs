pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{
    AggregationConfig, GeometryConfig, LoggingConfig, QueryConfig, Settings, load_settings,
};
