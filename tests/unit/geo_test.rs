//! Unit tests for geographic math and the off-screen indicator geometry

use poemwalk::world::geo::{
    bearing_degrees, distance, edge_intersection, Bounds, Coordinate, ScreenPoint, ScreenSize,
    Viewport,
};

fn sample_points() -> Vec<Coordinate> {
    vec![
        Coordinate::new(52.16583, 4.483413),
        Coordinate::new(52.164610049352, 4.48653665761824),
        Coordinate::new(52.15896289011223, 4.492492679291971),
        Coordinate::new(0.0, 0.0),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(89.9, -179.9),
        Coordinate::new(-89.9, 179.9),
    ]
}

#[test]
fn test_distance_symmetric_for_all_pairs() {
    let points = sample_points();
    for a in &points {
        assert_eq!(distance(*a, *a), 0.0);
        for b in &points {
            let ab = distance(*a, *b);
            let ba = distance(*b, *a);
            assert!((ab - ba).abs() < 1e-6, "{a} {b}: {ab} vs {ba}");
            assert!(ab >= 0.0 && ab.is_finite());
        }
    }
}

#[test]
fn test_bearing_always_in_range() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let bearing = bearing_degrees(*a, *b);
            assert!((0.0..360.0).contains(&bearing), "{a} -> {b}: {bearing}");
        }
    }
}

#[test]
fn test_bearing_tiny_westward_step_stays_below_360() {
    let from = Coordinate::new(52.0, 4.0);
    let to = Coordinate::new(52.0 + 1e-12, 4.0 - 1e-15);
    let bearing = bearing_degrees(from, to);
    assert!(bearing < 360.0);
}

#[test]
fn test_edge_intersection_all_sides() {
    let size = ScreenSize::new(800.0, 600.0);
    let center = size.center();
    let padding = 30.0;

    let right = edge_intersection(center, ScreenPoint::new(1000.0, 300.0), size, padding);
    assert_eq!(right, ScreenPoint::new(770.0, 300.0));

    let left = edge_intersection(center, ScreenPoint::new(-200.0, 300.0), size, padding);
    assert_eq!(left, ScreenPoint::new(30.0, 300.0));

    let top = edge_intersection(center, ScreenPoint::new(400.0, -500.0), size, padding);
    assert_eq!(top, ScreenPoint::new(400.0, 30.0));

    let bottom = edge_intersection(center, ScreenPoint::new(400.0, 1000.0), size, padding);
    assert_eq!(bottom, ScreenPoint::new(400.0, 570.0));
}

#[test]
fn test_edge_intersection_quadrants() {
    let size = ScreenSize::new(800.0, 600.0);
    let center = size.center();

    // Shallow ray up and to the right crosses the right edge
    let p = edge_intersection(center, ScreenPoint::new(1200.0, 0.0), size, 30.0);
    assert_eq!(p.x, 770.0);
    assert!((p.y - 161.25).abs() < 1e-9);

    // Steep ray down and to the left crosses the bottom edge
    let p = edge_intersection(center, ScreenPoint::new(300.0, 1500.0), size, 30.0);
    assert_eq!(p.y, 570.0);
    assert!(p.x < 400.0 && p.x > 30.0);

    // Exact diagonal lands inside the padded corner
    let p = edge_intersection(center, ScreenPoint::new(800.0, 600.0), size, 30.0);
    assert_eq!(p.y, 570.0);
    assert!((p.x - 760.0).abs() < 1e-9);

    // Degenerate ray returns the center
    let p = edge_intersection(center, center, size, 30.0);
    assert_eq!(p, center);
}

#[test]
fn test_edge_indicator_points_toward_target() {
    let center = Coordinate::new(52.16583, 4.483413);
    let viewport = Viewport::new(center, ScreenSize::new(1280.0, 800.0), 18.0);
    let far_north = Coordinate::new(52.20, 4.483413);
    assert!(!viewport.contains(far_north));

    let indicator = viewport.edge_indicator(far_north, 30.0);
    assert!(viewport.contains(indicator));
    assert!(indicator.lat > center.lat);
    assert!((indicator.lng - center.lng).abs() < 1e-6);
}

#[test]
fn test_bounds_cover_trace() {
    let points = sample_points();
    let bounds = Bounds::from_points(points[..3].iter().copied()).unwrap();
    for p in &points[..3] {
        assert!(bounds.contains(*p));
    }
    assert!(!bounds.contains(points[3]));
    assert!(Bounds::from_points(std::iter::empty()).is_none());
}
