use super::executor::execute;
use super::function::AggregateFunction;
use super::record::AggregateRecord;
use super::select::AggregateSelect;
use crate::engine::errors::QueryError;
use crate::engine::filter::{QueryParams, ValidationReport};
use crate::engine::schema::SchemaProvider;
use crate::engine::sensor::{FeatureFilter, resolve};
use crate::engine::storage::{NodeCatalog, QueryExecutor};
use crate::shared::config::CONFIG;
use crate::shared::datetime::{TimeParser, TimeUnit, generate_buckets, truncate};
use chrono::NaiveDateTime;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationOptions {
    pub parallel_buckets: bool,
}

impl AggregationOptions {
    pub fn from_config() -> Self {
        Self {
            parallel_buckets: CONFIG.aggregation.parallel_buckets,
        }
    }
}

/// A sensor aggregation request. Dates stay raw until `aggregate` parses
/// them so a bad date is reported against its parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRequest {
    pub node_id: String,
    pub features: FeatureFilter,
    pub start_datetime: String,
    pub end_datetime: String,
    pub sensors: Option<Vec<String>>,
    pub unit: TimeUnit,
    pub function: AggregateFunction,
}

impl AggregateRequest {
    pub fn new(
        node_id: impl Into<String>,
        features: &str,
        start_datetime: impl Into<String>,
        end_datetime: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            features: FeatureFilter::parse(features),
            start_datetime: start_datetime.into(),
            end_datetime: end_datetime.into(),
            sensors: None,
            unit: TimeUnit::Hour,
            function: AggregateFunction::Avg,
        }
    }

    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn function(mut self, function: AggregateFunction) -> Self {
        self.function = function;
        self
    }

    pub fn sensors(mut self, sensors: &[&str]) -> Self {
        self.sensors = Some(sensors.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Read `node_id`, `feature`, `start_datetime`, `end_datetime`, and the
    /// optional `sensors`, `agg` (default hour) and `function` (default avg).
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        let node_id = required(params, "node_id")?;
        let feature = required(params, "feature")?;
        let start_datetime = required(params, "start_datetime")?;
        let end_datetime = required(params, "end_datetime")?;

        let sensors = params.get("sensors").and_then(|raw| {
            let list: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            (!list.is_empty()).then_some(list)
        });

        let unit = match params.get("agg") {
            Some(raw) => raw.parse::<TimeUnit>()?,
            None => TimeUnit::Hour,
        };

        let function = match params.get("function") {
            Some(raw) => raw.parse::<AggregateFunction>().map_err(|e| {
                let mut report = ValidationReport::new();
                report.push("function", e);
                QueryError::Validation(report)
            })?,
            None => AggregateFunction::Avg,
        };

        Ok(Self {
            node_id: node_id.to_string(),
            features: FeatureFilter::parse(feature),
            start_datetime: start_datetime.to_string(),
            end_datetime: end_datetime.to_string(),
            sensors,
            unit,
            function,
        })
    }
}

fn required<'a>(params: &'a QueryParams, key: &str) -> Result<&'a str, QueryError> {
    params
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| QueryError::MissingParameter(key.to_string()))
}

fn parse_datetime(param: &str, value: &str) -> Result<NaiveDateTime, QueryError> {
    TimeParser::parse_naive(value).ok_or_else(|| QueryError::InvalidDatetime {
        param: param.to_string(),
        value: value.to_string(),
    })
}

/// Aggregate a node's observations of one feature into time buckets.
pub fn aggregate<S>(
    storage: &S,
    request: &AggregateRequest,
    opts: &AggregationOptions,
) -> Result<Vec<AggregateRecord>, QueryError>
where
    S: SchemaProvider + NodeCatalog + QueryExecutor,
{
    let start = parse_datetime("start_datetime", &request.start_datetime)?;
    let end = parse_datetime("end_datetime", &request.end_datetime)?;
    // Windows must start where the storage labels groups, or a calendar
    // period would straddle two windows
    let start = truncate(start, request.unit);

    let contradictory = || QueryError::ContradictoryFilters {
        node_id: request.node_id.clone(),
    };

    let eligible = resolve(
        storage,
        &request.node_id,
        request.sensors.as_deref(),
        &request.features,
    )?;
    if eligible.is_empty() {
        return Err(contradictory());
    }

    let table_name = request
        .features
        .primary_feature()
        .ok_or_else(|| QueryError::MissingParameter("feature".to_string()))?;
    let table = storage.describe(table_name)?;

    let select = AggregateSelect::build(&table, &eligible, request.function, request.unit)
        .for_node(request.node_id.clone())
        .with_sensors(request.sensors.clone());
    if select.is_empty() {
        return Err(contradictory());
    }

    let boundaries = generate_buckets(start, end, request.unit)?;
    let records = execute(storage, &select, &boundaries, opts.parallel_buckets)?;

    info!(
        target: "opendata_query::aggregate",
        node_id = %request.node_id,
        table = %select.table,
        function = %request.function,
        unit = %request.unit,
        windows = boundaries.len().saturating_sub(1),
        records = records.len(),
        "Aggregation complete"
    );
    Ok(records)
}
