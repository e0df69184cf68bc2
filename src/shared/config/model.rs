use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub query: QueryConfig,
    pub geometry: GeometryConfig,
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Upper bound applied to `limit` and used when it is absent
    pub response_limit: usize,
    /// Keys consumed by the caller before filter translation (e.g. `weather`)
    #[serde(default)]
    pub passthrough_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryConfig {
    /// Corridor half-width used when a `within` operand is a line
    pub line_buffer_meters: f64,
    pub srid: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Run bucket windows on the rayon pool instead of sequentially
    pub parallel_buckets: bool,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("OPENDATA_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("query.response_limit", 1000)?
        .set_default("query.passthrough_keys", vec!["weather"])?
        .set_default("geometry.line_buffer_meters", 100.0)?
        .set_default("geometry.srid", 4326)?
        .set_default("aggregation.parallel_buckets", false)?
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::with_prefix("OPENDATA").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
