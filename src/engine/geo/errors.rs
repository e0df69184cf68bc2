use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Operand is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a GeoJSON object")]
    NotAnObject,

    #[error("Geometry has no 'type' member")]
    MissingType,

    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    #[error("Invalid coordinates for {0}")]
    InvalidCoordinates(String),

    #[error("FeatureCollection has no features")]
    EmptyFeatureCollection,

    #[error("Feature has no geometry")]
    MissingGeometry,
}
