use super::shape::{Coord, Geometry};

/// Even-odd ray cast. Points exactly on an edge may land either way.
pub fn point_in_ring(p: Coord, ring: &[Coord]) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x = (b[0] - a[0]) * (p[1] - a[1]) / (b[1] - a[1]) + a[0];
            if p[0] < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the exterior ring and outside every hole.
pub fn point_in_polygon(p: Coord, rings: &[Vec<Coord>]) -> bool {
    match rings.split_first() {
        Some((exterior, holes)) => {
            point_in_ring(p, exterior) && !holes.iter().any(|h| point_in_ring(p, h))
        }
        None => false,
    }
}

impl Geometry {
    /// Whether every position of `self` lies inside `container`.
    ///
    /// Only areal containers can contain anything; vertex containment is
    /// exact for points and an approximation for lines and polygons.
    pub fn within(&self, container: &Geometry) -> bool {
        let inside = |p: Coord| match container {
            Geometry::Polygon(rings) => point_in_polygon(p, rings),
            Geometry::MultiPolygon(polys) => polys.iter().any(|rings| point_in_polygon(p, rings)),
            _ => false,
        };
        let positions = self.positions();
        !positions.is_empty() && positions.into_iter().all(inside)
    }
}
