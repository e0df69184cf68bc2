use super::buffer::buffer_line;
use super::errors::GeometryError;
use super::measure::{line_centroid, size_in_degrees};
use super::shape::Geometry;
use crate::shared::config::CONFIG;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOptions {
    /// Ground distance a line is widened by on each side
    pub line_buffer_meters: f64,
    pub srid: u32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            line_buffer_meters: 100.0,
            srid: 4326,
        }
    }
}

impl GeometryOptions {
    pub fn from_config() -> Self {
        Self {
            line_buffer_meters: CONFIG.geometry.line_buffer_meters,
            srid: CONFIG.geometry.srid,
        }
    }
}

/// A containment operand ready for the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGeometry {
    pub shape: Geometry,
    /// GeoJSON geometry with its `crs` member attached
    pub geojson: Value,
    /// Buffer distance in degrees of latitude when a line was widened
    pub buffer_degrees: Option<f64>,
}

impl NormalizedGeometry {
    pub fn is_buffered(&self) -> bool {
        self.buffer_degrees.is_some()
    }

    pub fn to_geojson_string(&self) -> String {
        self.geojson.to_string()
    }
}

/// Parse a raw `within` operand string.
pub fn parse_operand(raw: &str, opts: &GeometryOptions) -> Result<NormalizedGeometry, GeometryError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| GeometryError::InvalidJson(e.to_string()))?;
    normalize(&value, opts)
}

/// Resolve a Feature, FeatureCollection or bare geometry into the geometry a
/// containment predicate can use. Lines are widened into corridor polygons.
pub fn normalize(raw: &Value, opts: &GeometryOptions) -> Result<NormalizedGeometry, GeometryError> {
    let geometry_json = resolve_payload(raw)?;
    let shape = Geometry::from_json(geometry_json)?;

    let (shape, mut geojson, buffer_degrees) = match shape {
        Geometry::LineString(points) => {
            let centroid = line_centroid(&points)
                .ok_or_else(|| GeometryError::InvalidCoordinates("LineString".to_string()))?;
            let (degrees_x, degrees_y) = size_in_degrees(opts.line_buffer_meters, centroid[1]);
            let ring = buffer_line(&points, degrees_y, degrees_y / degrees_x);
            debug!(
                target: "opendata_query::geo",
                latitude = centroid[1],
                degrees_y,
                vertices = ring.len(),
                "Buffered line into corridor"
            );
            let polygon = Geometry::Polygon(vec![ring]);
            let json = polygon.to_json();
            (polygon, json, Some(degrees_y))
        }
        other => (other, geometry_json.clone(), None),
    };

    if let Some(obj) = geojson.as_object_mut() {
        obj.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": format!("EPSG:{}", opts.srid) } }),
        );
    }

    Ok(NormalizedGeometry {
        shape,
        geojson,
        buffer_degrees,
    })
}

fn resolve_payload(raw: &Value) -> Result<&Value, GeometryError> {
    let obj = raw.as_object().ok_or(GeometryError::NotAnObject)?;

    if let Some(features) = obj.get("features") {
        let first = features
            .as_array()
            .and_then(|f| f.first())
            .ok_or(GeometryError::EmptyFeatureCollection)?;
        return non_null_geometry(first.get("geometry"));
    }
    if obj.contains_key("geometry") {
        return non_null_geometry(obj.get("geometry"));
    }
    Ok(raw)
}

fn non_null_geometry(value: Option<&Value>) -> Result<&Value, GeometryError> {
    match value {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(GeometryError::MissingGeometry),
    }
}
