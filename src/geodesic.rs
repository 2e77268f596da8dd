//! Geodesic primitive used by the chunker.
//!
//! The chunker only relies on three operations: point distance, path length
//! and splitting a path into consecutive pieces of a target arc length.
//! Implementations are only required to be approximately correct. Known
//! artifacts (near-duplicate endpoints, a tiny trailing piece, elevation
//! copied onto synthetic vertices) are repaired in [`crate::chunking`].

use crate::GpsPoint;
use crate::geo_utils::{great_circle_point, haversine_distance};

/// Distance, length and splitting over longitude/latitude paths.
pub trait GeodesicPrimitive {
    /// Distance between two points in meters, ignoring elevation.
    fn distance(&self, a: &GpsPoint, b: &GpsPoint) -> f64;

    /// Total length of a path in meters.
    fn path_length(&self, path: &[GpsPoint]) -> f64 {
        path.windows(2).map(|w| self.distance(&w[0], &w[1])).sum()
    }

    /// Split `path` into consecutive sub-paths of roughly `chunk_length`
    /// meters each. The last vertex of piece `i` is the first vertex of
    /// piece `i + 1`.
    fn split(&self, path: &[GpsPoint], chunk_length: f64) -> Vec<Vec<GpsPoint>>;
}

/// Great-circle primitive built on `geo`'s haversine metric.
///
/// Synthetic vertices are placed on the great circle between the two
/// original vertices that bracket them and carry no elevation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineGeodesic;

impl GeodesicPrimitive for HaversineGeodesic {
    fn distance(&self, a: &GpsPoint, b: &GpsPoint) -> f64 {
        haversine_distance(a, b)
    }

    fn split(&self, path: &[GpsPoint], chunk_length: f64) -> Vec<Vec<GpsPoint>> {
        if path.is_empty() {
            return Vec::new();
        }
        if path.len() == 1 || !chunk_length.is_finite() || chunk_length <= 0.0 {
            return vec![path.to_vec()];
        }

        let mut chunks: Vec<Vec<GpsPoint>> = Vec::new();
        let mut current: Vec<GpsPoint> = vec![path[0]];
        // Arc length still missing from the chunk being built
        let mut remaining = chunk_length;

        for w in path.windows(2) {
            let (start, end) = (&w[0], &w[1]);
            let seg_len = self.distance(start, end);
            let mut consumed = 0.0;

            while seg_len > 0.0 && seg_len - consumed >= remaining {
                let ratio = (consumed + remaining) / seg_len;
                let boundary = if ratio >= 1.0 {
                    *end
                } else {
                    great_circle_point(start, end, ratio)
                };
                current.push(boundary);
                chunks.push(std::mem::replace(&mut current, vec![boundary]));
                consumed += remaining;
                remaining = chunk_length;
            }

            let last = current[current.len() - 1];
            if !last.same_position(end) {
                current.push(*end);
            }
            remaining -= seg_len - consumed;
        }

        if current.len() > 1 {
            chunks.push(current);
        }
        if chunks.is_empty() {
            // Every vertex coincides with the first one
            chunks.push(path.to_vec());
        }
        chunks
    }
}
