use super::errors::GeometryError;
use serde_json::{Value, json};

/// `[longitude, latitude]`
pub type Coord = [f64; 2];

const SUPPORTED_TYPES: [&str; 6] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
];

/// The GeoJSON geometry types a containment filter can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    Polygon(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, GeometryError> {
        let obj = value.as_object().ok_or(GeometryError::NotAnObject)?;
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeometryError::MissingType)?;
        if !SUPPORTED_TYPES.contains(&kind) {
            return Err(GeometryError::UnsupportedType(kind.to_string()));
        }
        let coords = obj
            .get("coordinates")
            .ok_or_else(|| GeometryError::InvalidCoordinates(kind.to_string()))?;
        let bad = || GeometryError::InvalidCoordinates(kind.to_string());

        match kind {
            "Point" => Ok(Geometry::Point(coord(coords).ok_or_else(bad)?)),
            "MultiPoint" => Ok(Geometry::MultiPoint(coord_list(coords, 1).ok_or_else(bad)?)),
            "LineString" => Ok(Geometry::LineString(coord_list(coords, 2).ok_or_else(bad)?)),
            "MultiLineString" => Ok(Geometry::MultiLineString(
                nested(coords, |c| coord_list(c, 2)).ok_or_else(bad)?,
            )),
            "Polygon" => Ok(Geometry::Polygon(polygon(coords).ok_or_else(bad)?)),
            "MultiPolygon" => Ok(Geometry::MultiPolygon(
                nested(coords, polygon).ok_or_else(bad)?,
            )),
            other => Err(GeometryError::UnsupportedType(other.to_string())),
        }
    }

    pub fn to_json(&self) -> Value {
        let coordinates = match self {
            Geometry::Point(c) => json!(c),
            Geometry::MultiPoint(cs) | Geometry::LineString(cs) => json!(cs),
            Geometry::MultiLineString(ls) | Geometry::Polygon(ls) => json!(ls),
            Geometry::MultiPolygon(ps) => json!(ps),
        };
        json!({ "type": self.type_name(), "coordinates": coordinates })
    }

    /// Every position of the geometry, rings and parts flattened.
    pub fn positions(&self) -> Vec<Coord> {
        match self {
            Geometry::Point(c) => vec![*c],
            Geometry::MultiPoint(cs) | Geometry::LineString(cs) => cs.clone(),
            Geometry::MultiLineString(ls) | Geometry::Polygon(ls) => ls.concat(),
            Geometry::MultiPolygon(ps) => ps.iter().flat_map(|p| p.concat()).collect(),
        }
    }
}

fn coord(value: &Value) -> Option<Coord> {
    let arr = value.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    let x = arr[0].as_f64()?;
    let y = arr[1].as_f64()?;
    (x.is_finite() && y.is_finite()).then_some([x, y])
}

fn coord_list(value: &Value, min: usize) -> Option<Vec<Coord>> {
    let list = value
        .as_array()?
        .iter()
        .map(coord)
        .collect::<Option<Vec<_>>>()?;
    (list.len() >= min).then_some(list)
}

fn polygon(value: &Value) -> Option<Vec<Vec<Coord>>> {
    let rings = nested(value, |r| coord_list(r, 4))?;
    let closed = rings.iter().all(|r| r.first() == r.last());
    (!rings.is_empty() && closed).then_some(rings)
}

fn nested<T>(value: &Value, item: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    value.as_array()?.iter().map(item).collect()
}
