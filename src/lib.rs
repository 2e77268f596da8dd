//! # Trail Profile
//!
//! Elevation profile derivation for ski runs and lifts.
//!
//! Given a trail or lift path (longitude/latitude vertices, optionally with
//! elevation) this library:
//! - fits a sampling resolution that divides the path into equal segments
//! - splits the path into equal-length chunks, repairing known artifacts of
//!   the geodesic splitting primitive
//! - interpolates missing elevations by distance between known vertices
//! - accumulates ascent, descent and elevation extrema
//! - computes average, maximum and overall pitch plus inclined length
//! - captures compact stored elevation profiles and rebuilds elevated paths
//!   from them
//!
//! ## Features
//!
//! - **`parallel`** - Batch computation on the rayon thread pool
//! - **`synthetic`** - Seeded synthetic trail generator for tests and benchmarks
//! - **`cli`** - `trailprofile-cli` debug tool for GPX files
//!
//! ## Quick Start
//!
//! ```rust
//! use trailprofile::{GpsPoint, ProfileEngine};
//!
//! let run = vec![
//!     GpsPoint::with_elevation(45.3000, 6.5800, 2400.0),
//!     GpsPoint::with_elevation(45.3010, 6.5810, 2330.0),
//!     GpsPoint::with_elevation(45.3020, 6.5815, 2270.0),
//! ];
//!
//! let engine = ProfileEngine::new();
//! let data = engine.elevation_data(&run).unwrap();
//! assert_eq!(data.vertical_in_meters, 130.0);
//! if let Some(max) = data.max_pitch_in_percent.value() {
//!     println!("steepest: {:.0}%", max);
//! }
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ErrorKind, OptionExt, ProfileError, Result};

// Geographic utilities (haversine distance, cumulative distance)
pub mod geo_utils;

// Geodesic primitive behind the chunker
pub mod geodesic;
pub use geodesic::{GeodesicPrimitive, HaversineGeodesic};

pub mod resolution;
pub use resolution::fit_resolution;

pub mod chunking;
pub use chunking::{ChunkedPath, chunk_path};

pub mod interpolation;
pub use interpolation::{interpolate_elevations, interpolate_vertices};

pub mod ascent;
pub use ascent::{AscentData, accumulate};

pub mod pitch;
pub use pitch::{Pitch, PitchData, calculate_pitch};

// Stored profiles: capture and reconstruction
pub mod profile;
pub use profile::{
    ElevationProfile, ElevationSource, capture_profile, profile_from_elevated_path, reconstruct,
    sample_points,
};

pub mod elevation;
pub use elevation::{ElevationData, FeatureGeometry, elevation_data, elevation_data_for_feature};

pub mod engine;
pub use engine::ProfileEngine;

// Synthetic trail generator (feature-gated)
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A path vertex: latitude and longitude in degrees, elevation in meters.
///
/// # Example
/// ```
/// use trailprofile::GpsPoint;
/// let top = GpsPoint::with_elevation(45.2975, 6.5826, 2700.0);
/// assert_eq!(top.elevation, Some(2700.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Build from a GeoJSON position `[lng, lat]` or `[lng, lat, ele]`.
    ///
    /// Returns `None` for fewer than two coordinates.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat] => Some(Self::new(*lat, *lng)),
            [lng, lat, ele, ..] => Some(Self::with_elevation(*lat, *lng, *ele)),
            _ => None,
        }
    }

    /// GeoJSON position of this point.
    pub fn to_position(&self) -> Vec<f64> {
        match self.elevation {
            Some(ele) => vec![self.longitude, self.latitude, ele],
            None => vec![self.longitude, self.latitude],
        }
    }

    /// Same horizontal position, no elevation.
    pub fn without_elevation(&self) -> Self {
        Self::new(self.latitude, self.longitude)
    }

    /// True if both points have bit-identical horizontal coordinates.
    pub fn same_position(&self, other: &GpsPoint) -> bool {
        self.position_key() == other.position_key()
    }

    pub(crate) fn position_key(&self) -> (u64, u64) {
        (self.longitude.to_bits(), self.latitude.to_bits())
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.elevation.is_none_or(f64::is_finite)
    }
}

/// Configuration for profile derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Chunk length (meters) over which maximum pitch is measured. Paths
    /// shorter than half of it get no pitch values.
    /// Default: 25.0 meters
    pub pitch_resolution_meters: f64,

    /// A trailing chunk shorter than this fraction of the fitted resolution
    /// is treated as a floating-point leftover and dropped.
    /// Default: 0.01
    pub short_chunk_fraction: f64,

    /// Endpoint pinning always happens; if it moves the last vertex further
    /// than this fraction of the resolution, a warning is logged.
    /// Default: 0.01
    pub endpoint_snap_fraction: f64,

    /// Relative tolerance between a stored profile's resolution and the one
    /// recomputed from its geometry.
    /// Default: 0.001 (0.1%)
    pub profile_resolution_tolerance: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            pitch_resolution_meters: 25.0,
            short_chunk_fraction: 0.01,
            endpoint_snap_fraction: 0.01,
            profile_resolution_tolerance: 0.001,
        }
    }
}
