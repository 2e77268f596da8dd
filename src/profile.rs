//! Stored elevation profiles.
//!
//! An [`ElevationProfile`] keeps one height per chunk boundary of a path
//! chunked at `target_resolution`. Reconstruction re-chunks the 2-D geometry
//! and zips the stored heights back on, index by index, after checking that
//! the geometry still yields the same sampling.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::chunking::chunk_path;
use crate::error::{OptionExt, ProfileError, Result};
use crate::geodesic::GeodesicPrimitive;
use crate::interpolation::interpolate_elevations;
use crate::{GpsPoint, ProfileConfig};

/// Compact, persisted height samples of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationProfile {
    /// Elevation in meters per sample, in path order
    pub heights: Vec<f64>,
    /// Fitted spacing between samples in meters
    pub resolution: f64,
    /// Requested maximum spacing; `resolution <= target_resolution`
    pub target_resolution: f64,
}

/// Anything that can look up ground elevation for a batch of points.
pub trait ElevationSource {
    /// Return one elevation in meters per input point, in order.
    fn elevations(&self, points: &[GpsPoint]) -> Result<Vec<f64>>;
}

impl<F> ElevationSource for F
where
    F: Fn(&[GpsPoint]) -> Result<Vec<f64>>,
{
    fn elevations(&self, points: &[GpsPoint]) -> Result<Vec<f64>> {
        self(points)
    }
}

fn planar(geometry: &[GpsPoint]) -> Vec<GpsPoint> {
    geometry.iter().map(GpsPoint::without_elevation).collect()
}

/// Horizontal sample points of `geometry` at `target_resolution`, and the
/// fitted resolution they are spaced at.
pub fn sample_points<G: GeodesicPrimitive + ?Sized>(
    geometry: &[GpsPoint],
    target_resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<(f64, Vec<GpsPoint>)> {
    let chunked = chunk_path(&planar(geometry), target_resolution, geodesic, config)?;
    Ok((chunked.resolution(), chunked.boundary_points()))
}

/// Capture a profile by asking `source` for heights at every sample point.
///
/// Fails with [`ProfileError::SourceCountMismatch`] when the source does
/// not return exactly one height per sample point.
pub fn capture_profile<S, G>(
    geometry: &[GpsPoint],
    target_resolution: f64,
    source: &S,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<ElevationProfile>
where
    S: ElevationSource + ?Sized,
    G: GeodesicPrimitive + ?Sized,
{
    let (resolution, points) = sample_points(geometry, target_resolution, geodesic, config)?;
    let heights = source.elevations(&points)?;
    if heights.len() != points.len() {
        return Err(ProfileError::SourceCountMismatch {
            expected: points.len(),
            actual: heights.len(),
        });
    }

    Ok(ElevationProfile {
        heights,
        resolution,
        target_resolution,
    })
}

/// Capture a profile from a path that already carries elevation, by
/// chunking and interpolating it.
pub fn profile_from_elevated_path<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    target_resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<ElevationProfile> {
    let chunked = chunk_path(path, target_resolution, geodesic, config)?;
    let chunked = interpolate_elevations(chunked, geodesic)?;
    let heights = chunked
        .boundary_points()
        .iter()
        .enumerate()
        .map(|(i, p)| p.elevation.ok_or_missing_elevation(i))
        .collect::<Result<Vec<f64>>>()?;

    Ok(ElevationProfile {
        heights,
        resolution: chunked.resolution(),
        target_resolution,
    })
}

/// Rebuild the elevated sample path of `geometry` from a stored profile.
///
/// Fails with [`ProfileError::ProfileMismatch`] when the geometry no longer
/// yields the stored number of samples or resolution.
pub fn reconstruct<G: GeodesicPrimitive + ?Sized>(
    geometry: &[GpsPoint],
    profile: &ElevationProfile,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<Vec<GpsPoint>> {
    let (resolution, points) =
        sample_points(geometry, profile.target_resolution, geodesic, config)?;

    let resolution_matches = if profile.resolution == 0.0 {
        resolution == 0.0
    } else {
        ((resolution - profile.resolution) / profile.resolution).abs()
            <= config.profile_resolution_tolerance
    };

    if points.len() != profile.heights.len() || !resolution_matches {
        debug!(
            "[Profile] Stale profile: {} heights at {:.3}m vs {} points at {:.3}m",
            profile.heights.len(),
            profile.resolution,
            points.len(),
            resolution
        );
        return Err(ProfileError::ProfileMismatch {
            expected_points: profile.heights.len(),
            actual_points: points.len(),
            expected_resolution: profile.resolution,
            actual_resolution: resolution,
        });
    }

    Ok(points
        .into_iter()
        .zip(profile.heights.iter())
        .map(|(p, &h)| GpsPoint::with_elevation(p.latitude, p.longitude, h))
        .collect())
}
