//! Pitch (slope) statistics for a fully elevated path.
//!
//! Per-segment pitch is unreliable when the elevation source is coarser than
//! the path's own vertex spacing: a 1 m segment with a 1 m elevation step
//! reads as a 100% grade. So two notions are kept apart:
//!
//! - average and overall pitch use the original vertices, where averaging
//!   cancels the noise;
//! - maximum pitch is measured over equal chunks of a fixed length, built
//!   with the chunker and interpolator, which smooths single-segment spikes.
//!
//! Paths shorter than half the pitch resolution report every pitch as
//! [`Pitch::Unavailable`]. That means "unknown", never zero.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::chunking::chunk_path;
use crate::error::{OptionExt, ProfileError, Result};
use crate::geodesic::GeodesicPrimitive;
use crate::interpolation::interpolate_elevations;
use crate::resolution::fit_length;
use crate::{GpsPoint, ProfileConfig};

/// A pitch in percent, or the explicit absence of one.
///
/// Serialised as a nullable number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Pitch {
    /// The path is too short for the elevation resolution to support an estimate
    Unavailable,
    Value(f64),
}

impl Pitch {
    pub fn value(self) -> Option<f64> {
        match self {
            Pitch::Unavailable => None,
            Pitch::Value(v) => Some(v),
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Pitch::Value(_))
    }
}

impl From<Option<f64>> for Pitch {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Pitch::Unavailable, Pitch::Value)
    }
}

impl From<Pitch> for Option<f64> {
    fn from(pitch: Pitch) -> Self {
        pitch.value()
    }
}

/// Result of [`calculate_pitch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchData {
    pub average_pitch_in_percent: Pitch,
    pub max_pitch_in_percent: Pitch,
    pub overall_pitch_in_percent: Pitch,
    /// 3-D length over the original segments, always computed
    pub inclined_length_in_meters: f64,
    /// Chunk length used for the maximum pitch
    pub pitch_calculation_resolution_in_meters: f64,
}

/// Compute pitch statistics for a path whose every vertex has elevation.
pub fn calculate_pitch<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    min_resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<PitchData> {
    if path.is_empty() {
        return Err(ProfileError::EmptyPath);
    }
    if !min_resolution.is_finite() || min_resolution <= 0.0 {
        return Err(ProfileError::InvalidResolution(min_resolution));
    }

    let elevations = path
        .iter()
        .enumerate()
        .map(|(i, p)| p.elevation.ok_or_missing_elevation(i))
        .collect::<Result<Vec<f64>>>()?;

    let mut total_length = 0.0;
    let mut inclined_length = 0.0;
    let mut absolute_change = 0.0;
    for (i, w) in path.windows(2).enumerate() {
        let horizontal = geodesic.distance(&w[0], &w[1]);
        let delta = elevations[i + 1] - elevations[i];
        total_length += horizontal;
        inclined_length += horizontal.hypot(delta);
        absolute_change += delta.abs();
    }

    let pitch_resolution = fit_length(total_length, min_resolution);

    if total_length < min_resolution / 2.0 {
        debug!(
            "[Pitch] {:.2}m path below half of {:.1}m resolution, pitch unavailable",
            total_length, min_resolution
        );
        return Ok(PitchData {
            average_pitch_in_percent: Pitch::Unavailable,
            max_pitch_in_percent: Pitch::Unavailable,
            overall_pitch_in_percent: Pitch::Unavailable,
            inclined_length_in_meters: inclined_length,
            pitch_calculation_resolution_in_meters: pitch_resolution,
        });
    }

    let first = elevations[0];
    let last = elevations[elevations.len() - 1];

    let max_pitch = max_chunk_pitch(path, min_resolution, geodesic, config)?;

    Ok(PitchData {
        average_pitch_in_percent: Pitch::Value(absolute_change / total_length * 100.0),
        max_pitch_in_percent: Pitch::Value(max_pitch),
        overall_pitch_in_percent: Pitch::Value((last - first).abs() / total_length * 100.0),
        inclined_length_in_meters: inclined_length,
        pitch_calculation_resolution_in_meters: pitch_resolution,
    })
}

/// Largest absolute grade, in percent, over fixed-length chunks.
fn max_chunk_pitch<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    min_resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<f64> {
    let chunked = chunk_path(path, min_resolution, geodesic, config)?;
    let chunked = interpolate_elevations(chunked, geodesic)?;

    let mut max_pitch: f64 = 0.0;
    for (index, chunk) in chunked.chunks().enumerate() {
        let length = geodesic.path_length(chunk);
        if length <= 0.0 {
            continue;
        }
        let start = chunk[0].elevation.ok_or_missing_elevation(index)?;
        let end = chunk[chunk.len() - 1]
            .elevation
            .ok_or_missing_elevation(index)?;
        max_pitch = max_pitch.max((end - start).abs() / length * 100.0);
    }
    Ok(max_pitch)
}
