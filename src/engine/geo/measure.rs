use super::shape::Coord;

/// Mean circumference used to turn meters into degrees.
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_041_000.0;

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Degrees spanned by `meters` at `latitude`, as `(longitude, latitude)`.
///
/// A degree of latitude is the same length everywhere; a degree of longitude
/// shrinks with `cos(latitude)`, so the longitude span grows toward the poles.
pub fn size_in_degrees(meters: f64, latitude: f64) -> (f64, f64) {
    let degrees_per_meter = 360.0 / EARTH_CIRCUMFERENCE_METERS;
    let degrees_y = meters * degrees_per_meter;
    let correction = latitude.to_radians().cos().abs().max(f64::EPSILON);
    (degrees_y / correction, degrees_y)
}

/// Length-weighted centroid of a polyline. Degenerate (zero-length) lines
/// fall back to the mean of their positions.
pub fn line_centroid(points: &[Coord]) -> Option<Coord> {
    if points.is_empty() {
        return None;
    }
    let mut total = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for w in points.windows(2) {
        let len = distance(w[0], w[1]);
        total += len;
        cx += len * (w[0][0] + w[1][0]) / 2.0;
        cy += len * (w[0][1] + w[1][1]) / 2.0;
    }
    if total > 0.0 {
        return Some([cx / total, cy / total]);
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    Some([sx / n, sy / n])
}

/// Great-circle distance between two `[lon, lat]` positions.
pub fn haversine_meters(a: Coord, b: Coord) -> f64 {
    let (lat1, lat2) = (a[1].to_radians(), b[1].to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b[0] - a[0]).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Planar distance in coordinate units.
pub fn distance(a: Coord, b: Coord) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// Shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Coord]) -> f64 {
    ring.windows(2)
        .map(|w| w[0][0] * w[1][1] - w[1][0] * w[0][1])
        .sum::<f64>()
        / 2.0
}
