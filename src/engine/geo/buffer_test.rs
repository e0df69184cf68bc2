use super::buffer::{QUADRANT_SEGMENTS, buffer_line};
use super::contains::point_in_ring;
use super::measure::signed_area;

fn min_distance_to_segment(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len2 = dx * dx + dy * dy;
    let t = (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len2).clamp(0.0, 1.0);
    let proj = [a[0] + t * dx, a[1] + t * dy];
    (p[0] - proj[0]).hypot(p[1] - proj[1])
}

#[test]
fn straight_line_becomes_a_closed_ccw_capsule() {
    let ring = buffer_line(&[[0.0, 0.0], [10.0, 0.0]], 1.0, 1.0);

    assert_eq!(ring.first(), ring.last());
    assert!(signed_area(&ring) > 0.0);

    // Rectangle 10 x 2 plus a unit circle, minus chord error
    let area = signed_area(&ring);
    let exact = 20.0 + std::f64::consts::PI;
    assert!((area - exact).abs() < 0.05, "area {area}");

    // Every vertex sits on the corridor boundary
    for p in &ring {
        let d = min_distance_to_segment(*p, [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 1.0).abs() < 1e-9, "vertex {p:?} at distance {d}");
    }
}

#[test]
fn corridor_contains_the_line_and_excludes_far_points() {
    let line = [[0.0, 0.0], [5.0, 0.0], [5.0, 5.0]];
    let ring = buffer_line(&line, 0.5, 1.0);

    assert!(point_in_ring([2.5, 0.0], &ring));
    assert!(point_in_ring([5.0, 2.5], &ring));
    assert!(point_in_ring([2.5, 0.4], &ring));
    assert!(!point_in_ring([2.5, 0.6], &ring));
    assert!(!point_in_ring([0.0, 5.0], &ring));
}

#[test]
fn right_turns_get_round_outer_corners() {
    let ring = buffer_line(&[[0.0, 0.0], [1.0, 0.0], [1.0, -1.0]], 0.25, 1.0);
    // Straight capsule has 2 caps of 2 * QUADRANT_SEGMENTS - 1 interior points
    // plus 4 side points; the corner arc adds more.
    assert!(ring.len() > 2 * (2 * QUADRANT_SEGMENTS - 1) + 4 + 1);
    assert!(signed_area(&ring) > 0.0);
}

#[test]
fn x_scale_stretches_the_corridor_horizontally() {
    let ring = buffer_line(&[[0.0, 0.0], [0.0, 10.0]], 1.0, 0.5);
    let max_x = ring.iter().map(|p| p[0]).fold(f64::MIN, f64::max);
    let max_y = ring.iter().map(|p| p[1]).fold(f64::MIN, f64::max);

    assert!((max_x - 2.0).abs() < 1e-9, "max_x {max_x}");
    assert!((max_y - 11.0).abs() < 1e-9, "max_y {max_y}");
}

#[test]
fn collapsed_line_becomes_a_circle() {
    let ring = buffer_line(&[[3.0, 3.0], [3.0, 3.0]], 1.0, 1.0);
    assert_eq!(ring.len(), 4 * QUADRANT_SEGMENTS + 1);
    assert!(point_in_ring([3.0, 3.0], &ring));
    assert!(signed_area(&ring) > 0.0);
}

#[test]
fn empty_input_yields_no_ring() {
    assert!(buffer_line(&[], 1.0, 1.0).is_empty());
}

#[test]
fn repeated_vertices_are_collapsed_before_buffering() {
    let plain = buffer_line(&[[0.0, 0.0], [10.0, 0.0]], 1.0, 1.0);
    let repeated = buffer_line(&[[0.0, 0.0], [0.0, 0.0], [10.0, 0.0], [10.0, 0.0]], 1.0, 1.0);
    assert_eq!(plain, repeated);
}
