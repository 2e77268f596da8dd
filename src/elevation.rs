//! Terrain metrics for a fully elevated path, and the entry point used by
//! run/lift feature records.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ascent::accumulate;
use crate::error::Result;
use crate::geodesic::GeodesicPrimitive;
use crate::pitch::{Pitch, calculate_pitch};
use crate::profile::{ElevationProfile, reconstruct};
use crate::{GpsPoint, ProfileConfig};

/// Derived terrain summary of an elevated path.
///
/// Purely computed: built once per call and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationData {
    pub ascent_in_meters: f64,
    pub descent_in_meters: f64,
    pub min_elevation_in_meters: f64,
    pub max_elevation_in_meters: f64,
    pub vertical_in_meters: f64,
    pub average_pitch_in_percent: Pitch,
    pub max_pitch_in_percent: Pitch,
    pub overall_pitch_in_percent: Pitch,
    pub inclined_length_in_meters: f64,
    pub pitch_calculation_resolution_in_meters: f64,
}

/// Compute ascent, descent, extrema and pitch statistics for `path`.
///
/// Every vertex of `path` must carry elevation.
pub fn elevation_data<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<ElevationData> {
    let ascent = accumulate(path)?;
    let pitch = calculate_pitch(path, config.pitch_resolution_meters, geodesic, config)?;

    Ok(ElevationData {
        ascent_in_meters: ascent.ascent,
        descent_in_meters: ascent.descent,
        min_elevation_in_meters: ascent.min,
        max_elevation_in_meters: ascent.max,
        vertical_in_meters: ascent.vertical,
        average_pitch_in_percent: pitch.average_pitch_in_percent,
        max_pitch_in_percent: pitch.max_pitch_in_percent,
        overall_pitch_in_percent: pitch.overall_pitch_in_percent,
        inclined_length_in_meters: pitch.inclined_length_in_meters,
        pitch_calculation_resolution_in_meters: pitch.pitch_calculation_resolution_in_meters,
    })
}

/// GeoJSON position: `[longitude, latitude]` or `[longitude, latitude, elevation]`.
pub type Position = Vec<f64>;

/// Geometry of a run or lift feature, in GeoJSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum FeatureGeometry {
    Point(Position),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl FeatureGeometry {
    /// The path of a single continuous line, if this geometry is one.
    ///
    /// Returns `None` for other geometry types and for malformed positions.
    pub fn line_path(&self) -> Option<Vec<GpsPoint>> {
        match self {
            FeatureGeometry::LineString(positions) => positions
                .iter()
                .map(|p| GpsPoint::from_position(p))
                .collect(),
            _ => None,
        }
    }
}

/// Elevation data for a feature geometry, optionally using a stored profile.
///
/// Returns `Ok(None)` when the geometry is not a single line or when the
/// data is simply not available (2-D geometry without profile, stale
/// profile, too few elevations). Logic defects are propagated as errors.
pub fn elevation_data_for_feature<G: GeodesicPrimitive + ?Sized>(
    geometry: &FeatureGeometry,
    profile: Option<&ElevationProfile>,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<Option<ElevationData>> {
    let Some(path) = geometry.line_path() else {
        return Ok(None);
    };

    let result = match profile {
        Some(profile) => reconstruct(&path, profile, geodesic, config)
            .and_then(|elevated| elevation_data(&elevated, geodesic, config)),
        None => elevation_data(&path, geodesic, config),
    };

    match result {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.is_defect() => Err(e),
        Err(e) => {
            warn!("[Elevation] No elevation data for feature: {}", e);
            Ok(None)
        }
    }
}
