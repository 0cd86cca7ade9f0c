//! Distance functions over `[lat, lon]` pairs

use geo::{Distance, Haversine, Point};

use crate::models::DistanceMetric;

/// Planar distance on raw coordinate values
pub fn euclidean(a: [f64; 2], b: [f64; 2]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    (d0 * d0 + d1 * d1).sqrt()
}

/// Great-circle distance in meters between two `[lat, lon]` pairs in degrees
pub fn haversine_meters(a: [f64; 2], b: [f64; 2]) -> f64 {
    Haversine.distance(Point::new(a[1], a[0]), Point::new(b[1], b[0]))
}

/// Position of a `[lat, lon]` pair on the unit sphere
///
/// Chord length between unit vectors grows monotonically with the
/// great-circle angle, so a Euclidean nearest neighbor in this space is the
/// geodesic nearest neighbor.
pub fn unit_vector(p: [f64; 2]) -> [f64; 3] {
    let lat = p[0].to_radians();
    let lon = p[1].to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Distance between two `[lat, lon]` pairs under a metric
pub fn distance(metric: DistanceMetric, a: [f64; 2], b: [f64; 2]) -> f64 {
    match metric {
        DistanceMetric::Euclidean => euclidean(a, b),
        DistanceMetric::Haversine => haversine_meters(a, b),
    }
}
