use super::measure::distance;
use super::shape::Coord;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Segments used to approximate a quarter circle.
pub const QUADRANT_SEGMENTS: usize = 16;

/// Inner joins whose miter would reach further than this many distances are
/// cut instead.
const MITER_LIMIT: f64 = 10.0;

const EPS: f64 = 1e-12;

/// Buffers a polyline into a closed, counter-clockwise polygon ring.
///
/// `x_scale` squeezes the x axis before buffering and stretches it back
/// afterwards. With `x_scale = cos(latitude)` a buffer of `d` degrees
/// of latitude becomes the same ground distance in both directions.
///
/// Ends are rounded, outer corners are rounded, inner corners are mitered.
pub fn buffer_line(points: &[Coord], d: f64, x_scale: f64) -> Vec<Coord> {
    let scale = if x_scale.abs() > EPS { x_scale } else { 1.0 };
    let mut path: Vec<Coord> = Vec::with_capacity(points.len());
    for p in points {
        let q = [p[0] * scale, p[1]];
        if path.last().is_none_or(|last| distance(*last, q) > EPS) {
            path.push(q);
        }
    }

    let mut ring = match path.len() {
        0 => return Vec::new(),
        1 => circle(path[0], d),
        _ => corridor(&path, d),
    };

    // Emitted clockwise; GeoJSON exteriors run counter-clockwise
    ring.reverse();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    for p in ring.iter_mut() {
        p[0] /= scale;
    }
    ring
}

fn corridor(path: &[Coord], d: f64) -> Vec<Coord> {
    let mut ring = Vec::new();

    let forward_normal = left_side(path, d, &mut ring);
    arc(path[path.len() - 1], d, angle(forward_normal), PI, &mut ring);

    let reversed: Vec<Coord> = path.iter().rev().copied().collect();
    let backward_normal = left_side(&reversed, d, &mut ring);
    arc(path[0], d, angle(backward_normal), PI, &mut ring);

    ring
}

/// Offsets the left side of `path`, returning the last segment's normal.
fn left_side(path: &[Coord], d: f64, out: &mut Vec<Coord>) -> Coord {
    let dirs: Vec<Coord> = path.windows(2).map(|w| unit(w[0], w[1])).collect();
    let normals: Vec<Coord> = dirs.iter().map(|u| [-u[1], u[0]]).collect();

    out.push(offset(path[0], normals[0], d));
    for i in 1..path.len() - 1 {
        let (a, b) = (normals[i - 1], normals[i]);
        let turn = cross(dirs[i - 1], dirs[i]);
        let p = path[i];

        if turn < -EPS {
            // Right turn: the left side is the outside of the corner
            out.push(offset(p, a, d));
            let sweep = (angle(a) - angle(b)).rem_euclid(TAU);
            arc(p, d, angle(a), sweep, out);
            out.push(offset(p, b, d));
        } else if turn > EPS {
            let denom = 1.0 + a[0] * b[0] + a[1] * b[1];
            let miter = [(a[0] + b[0]) / denom, (a[1] + b[1]) / denom];
            if denom > EPS && miter[0].hypot(miter[1]) <= MITER_LIMIT {
                out.push(offset(p, miter, d));
            } else {
                out.push(offset(p, a, d));
                out.push(offset(p, b, d));
            }
        } else {
            out.push(offset(p, a, d));
        }
    }
    let last = normals[normals.len() - 1];
    out.push(offset(path[path.len() - 1], last, d));
    last
}

/// Points strictly inside a clockwise arc of `sweep` radians starting at
/// `start`; the endpoints are emitted by the caller.
fn arc(center: Coord, d: f64, start: f64, sweep: f64, out: &mut Vec<Coord>) {
    let steps = ((sweep / (FRAC_PI_2 / QUADRANT_SEGMENTS as f64)).ceil() as usize).max(1);
    for k in 1..steps {
        let theta = start - sweep * k as f64 / steps as f64;
        out.push([center[0] + d * theta.cos(), center[1] + d * theta.sin()]);
    }
}

fn circle(center: Coord, d: f64) -> Vec<Coord> {
    let steps = 4 * QUADRANT_SEGMENTS;
    (0..steps)
        .map(|k| {
            let theta = -TAU * k as f64 / steps as f64;
            [center[0] + d * theta.cos(), center[1] + d * theta.sin()]
        })
        .collect()
}

fn unit(a: Coord, b: Coord) -> Coord {
    let len = distance(a, b);
    [(b[0] - a[0]) / len, (b[1] - a[1]) / len]
}

fn offset(p: Coord, n: Coord, d: f64) -> Coord {
    [p[0] + n[0] * d, p[1] + n[1] * d]
}

fn cross(u: Coord, v: Coord) -> f64 {
    u[0] * v[1] - u[1] * v[0]
}

fn angle(v: Coord) -> f64 {
    v[1].atan2(v[0])
}
