//! Geographic helpers over [`GpsPoint`] sequences.

use geo::{Distance, Haversine, InterpolatePoint, Point};

use crate::GpsPoint;

fn to_point(p: &GpsPoint) -> Point<f64> {
    Point::new(p.longitude, p.latitude)
}

/// Haversine distance between two points in meters. Elevation is ignored.
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    Haversine::distance(to_point(p1), to_point(p2))
}

/// Total horizontal length of a path in meters.
pub fn calculate_path_length(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Cumulative distances along a path.
/// Returns a vector where `dist[i]` is the distance from start to point `i`.
pub fn cumulative_distances(points: &[GpsPoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += haversine_distance(&points[i - 1], point);
        }
        distances.push(total);
    }
    distances
}

/// Point on the great circle from `start` to `end` at `ratio` of the way.
///
/// The returned point never carries elevation.
pub fn great_circle_point(start: &GpsPoint, end: &GpsPoint, ratio: f64) -> GpsPoint {
    let p = Haversine::point_at_ratio_between(to_point(start), to_point(end), ratio);
    GpsPoint::new(p.y(), p.x())
}
