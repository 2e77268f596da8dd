//! # Profile Engine
//!
//! Bundles a [`GeodesicPrimitive`] with a [`ProfileConfig`] so callers do not
//! have to thread both through every call. The engine holds no mutable
//! state; every method is a pure function of its arguments, so one engine
//! can serve many paths concurrently.

use crate::ascent::{AscentData, accumulate};
use crate::chunking::{ChunkedPath, chunk_path};
use crate::elevation::{ElevationData, FeatureGeometry, elevation_data, elevation_data_for_feature};
use crate::error::Result;
use crate::geodesic::{GeodesicPrimitive, HaversineGeodesic};
use crate::interpolation::interpolate_elevations;
use crate::pitch::{PitchData, calculate_pitch};
use crate::profile::{
    ElevationProfile, ElevationSource, capture_profile, profile_from_elevated_path, reconstruct,
};
use crate::resolution::fit_resolution;
use crate::{GpsPoint, ProfileConfig};

/// Elevation profile engine.
///
/// # Example
/// ```
/// use trailprofile::{GpsPoint, ProfileEngine};
///
/// let engine = ProfileEngine::new();
/// let path: Vec<GpsPoint> = (0..5)
///     .map(|i| GpsPoint::with_elevation(45.0 + i as f64 * 0.001, 6.0, 2000.0 - i as f64 * 20.0))
///     .collect();
///
/// let data = engine.elevation_data(&path).unwrap();
/// assert_eq!(data.descent_in_meters, 80.0);
/// assert!(data.max_pitch_in_percent.is_available());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileEngine<G = HaversineGeodesic> {
    geodesic: G,
    config: ProfileConfig,
}

impl ProfileEngine<HaversineGeodesic> {
    /// Create an engine with the haversine primitive and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfileConfig) -> Self {
        Self {
            geodesic: HaversineGeodesic,
            config,
        }
    }
}

impl<G: GeodesicPrimitive> ProfileEngine<G> {
    /// Create an engine around a different geodesic primitive.
    pub fn with_geodesic(geodesic: G, config: ProfileConfig) -> Self {
        Self { geodesic, config }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn geodesic(&self) -> &G {
        &self.geodesic
    }

    pub fn fit_resolution(&self, path: &[GpsPoint], min_resolution: f64) -> Result<f64> {
        fit_resolution(path, min_resolution, &self.geodesic)
    }

    pub fn chunk(&self, path: &[GpsPoint], min_resolution: f64) -> Result<ChunkedPath> {
        chunk_path(path, min_resolution, &self.geodesic, &self.config)
    }

    pub fn interpolate(&self, chunked: ChunkedPath) -> Result<ChunkedPath> {
        interpolate_elevations(chunked, &self.geodesic)
    }

    pub fn accumulate(&self, path: &[GpsPoint]) -> Result<AscentData> {
        accumulate(path)
    }

    /// Pitch statistics at the configured pitch resolution.
    pub fn pitch(&self, path: &[GpsPoint]) -> Result<PitchData> {
        calculate_pitch(
            path,
            self.config.pitch_resolution_meters,
            &self.geodesic,
            &self.config,
        )
    }

    pub fn elevation_data(&self, path: &[GpsPoint]) -> Result<ElevationData> {
        elevation_data(path, &self.geodesic, &self.config)
    }

    pub fn capture_profile<S: ElevationSource + ?Sized>(
        &self,
        geometry: &[GpsPoint],
        target_resolution: f64,
        source: &S,
    ) -> Result<ElevationProfile> {
        capture_profile(
            geometry,
            target_resolution,
            source,
            &self.geodesic,
            &self.config,
        )
    }

    pub fn profile_from_elevated_path(
        &self,
        path: &[GpsPoint],
        target_resolution: f64,
    ) -> Result<ElevationProfile> {
        profile_from_elevated_path(path, target_resolution, &self.geodesic, &self.config)
    }

    pub fn reconstruct(
        &self,
        geometry: &[GpsPoint],
        profile: &ElevationProfile,
    ) -> Result<Vec<GpsPoint>> {
        reconstruct(geometry, profile, &self.geodesic, &self.config)
    }

    pub fn elevation_data_for_feature(
        &self,
        geometry: &FeatureGeometry,
        profile: Option<&ElevationProfile>,
    ) -> Result<Option<ElevationData>> {
        elevation_data_for_feature(geometry, profile, &self.geodesic, &self.config)
    }
}

impl<G: GeodesicPrimitive + Sync> ProfileEngine<G> {
    /// Compute elevation data for many independent paths.
    ///
    /// With the `parallel` feature the paths are processed on the rayon
    /// thread pool. Output order matches input order.
    pub fn elevation_data_batch(&self, paths: &[Vec<GpsPoint>]) -> Vec<Result<ElevationData>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            paths
                .par_iter()
                .map(|path| self.elevation_data(path))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            paths.iter().map(|path| self.elevation_data(path)).collect()
        }
    }
}
