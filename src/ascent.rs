//! Ascent / descent accumulation over a fully elevated path.

use serde::{Deserialize, Serialize};

use crate::GpsPoint;
use crate::error::{OptionExt, ProfileError, Result};

/// Cumulative elevation gain and loss plus extrema, all in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AscentData {
    /// Sum of positive elevation differences
    pub ascent: f64,
    /// Sum of magnitudes of negative elevation differences
    pub descent: f64,
    pub min: f64,
    pub max: f64,
    /// `max - min`
    pub vertical: f64,
}

/// Walk consecutive elevations and accumulate gain, loss and extrema.
///
/// Every vertex must carry elevation.
///
/// # Example
/// ```
/// use trailprofile::GpsPoint;
/// use trailprofile::ascent::accumulate;
///
/// let path = vec![
///     GpsPoint::with_elevation(45.0, 6.0, 100.0),
///     GpsPoint::with_elevation(45.001, 6.0, 150.0),
///     GpsPoint::with_elevation(45.002, 6.0, 130.0),
/// ];
/// let data = accumulate(&path).unwrap();
/// assert_eq!(data.ascent, 50.0);
/// assert_eq!(data.descent, 20.0);
/// ```
pub fn accumulate(path: &[GpsPoint]) -> Result<AscentData> {
    let first = path.first().ok_or(ProfileError::EmptyPath)?;
    let mut previous = first.elevation.ok_or_missing_elevation(0)?;

    let mut data = AscentData {
        ascent: 0.0,
        descent: 0.0,
        min: previous,
        max: previous,
        vertical: 0.0,
    };

    for (index, point) in path.iter().enumerate().skip(1) {
        let elevation = point.elevation.ok_or_missing_elevation(index)?;
        let delta = elevation - previous;
        if delta > 0.0 {
            data.ascent += delta;
        } else {
            data.descent -= delta;
        }
        data.min = data.min.min(elevation);
        data.max = data.max.max(elevation);
        previous = elevation;
    }

    data.vertical = data.max - data.min;
    Ok(data)
}
