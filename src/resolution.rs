//! Resolution fitting.
//!
//! Picks a sampling resolution no larger than the requested one that
//! divides the path length into a whole number of equal segments, so chunk
//! length checks downstream can compare against an exact value.

use crate::GpsPoint;
use crate::error::{ProfileError, Result};
use crate::geodesic::GeodesicPrimitive;

/// Fit a resolution `<= min_resolution` that evenly divides the path length.
///
/// Returns `0.0` for a zero-length (or single-vertex, or empty) path.
/// A path shorter than `min_resolution` yields its own length.
///
/// # Example
/// ```
/// use trailprofile::{GpsPoint, HaversineGeodesic};
/// use trailprofile::resolution::fit_resolution;
///
/// let path = vec![GpsPoint::new(45.0, 6.0), GpsPoint::new(45.001, 6.0)];
/// let r = fit_resolution(&path, 25.0, &HaversineGeodesic).unwrap();
/// assert!(r <= 25.0);
/// ```
pub fn fit_resolution<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    min_resolution: f64,
    geodesic: &G,
) -> Result<f64> {
    if !min_resolution.is_finite() || min_resolution <= 0.0 {
        return Err(ProfileError::InvalidResolution(min_resolution));
    }
    let total_length = geodesic.path_length(path);
    Ok(fit_length(total_length, min_resolution))
}

/// Same as [`fit_resolution`] for an already measured length.
pub(crate) fn fit_length(total_length: f64, min_resolution: f64) -> f64 {
    if total_length <= 0.0 {
        return 0.0;
    }
    let segments = (total_length / min_resolution).ceil().max(1.0);
    total_length / segments
}

/// Number of equal segments a fitted resolution cuts the path into.
pub fn segment_count(total_length: f64, resolution: f64) -> usize {
    if resolution <= 0.0 {
        return 0;
    }
    (total_length / resolution).round() as usize
}
