//! Synthetic trail generator for testing and benchmarking.
//!
//! Generates elevated trail paths with a known terrain shape so pitch and
//! ascent results can be checked against ground truth.
//!
//! Feature-gated behind `synthetic`, not part of production builds.
//!
//! # Example
//!
//! ```rust
//! use trailprofile::synthetic::{SyntheticTrail, TerrainPattern};
//! use trailprofile::GpsPoint;
//!
//! let trail = SyntheticTrail {
//!     origin: GpsPoint::new(45.30, 6.58),
//!     length_meters: 2_000.0,
//!     vertex_spacing_meters: 20.0,
//!     start_elevation: 2_500.0,
//!     pattern: TerrainPattern::SteadyGrade { percent: -30.0 },
//!     winding: true,
//!     elevation_noise_meters: 0.0,
//!     seed: 7,
//! };
//!
//! let path = trail.generate();
//! assert!(path.iter().all(|p| p.elevation.is_some()));
//! ```

use crate::GpsPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

// ============================================================================
// Types
// ============================================================================

/// Shape of the generated elevation along the trail.
#[derive(Debug, Clone, Copy)]
pub enum TerrainPattern {
    /// Constant grade in percent (negative = downhill).
    SteadyGrade { percent: f64 },
    /// Sinusoidal rollers on top of a base grade.
    Rolling {
        base_percent: f64,
        amplitude_meters: f64,
        wavelength_meters: f64,
    },
    /// Flat stretches joined by abrupt steps, like a run with cliffs.
    Steps {
        step_every_meters: f64,
        step_height_meters: f64,
    },
}

/// Configuration for one synthetic trail.
#[derive(Debug, Clone)]
pub struct SyntheticTrail {
    /// First vertex (elevation ignored).
    pub origin: GpsPoint,
    /// Approximate horizontal length in meters.
    pub length_meters: f64,
    /// Horizontal spacing between generated vertices.
    pub vertex_spacing_meters: f64,
    /// Elevation of the first vertex.
    pub start_elevation: f64,
    pub pattern: TerrainPattern,
    /// Random heading changes instead of a straight line.
    pub winding: bool,
    /// Uniform elevation noise amplitude in meters.
    pub elevation_noise_meters: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

// ============================================================================
// Generation
// ============================================================================

impl TerrainPattern {
    /// Ground-truth elevation offset at `distance` meters along the trail.
    pub fn elevation_at(&self, distance: f64) -> f64 {
        match *self {
            TerrainPattern::SteadyGrade { percent } => distance * percent / 100.0,
            TerrainPattern::Rolling {
                base_percent,
                amplitude_meters,
                wavelength_meters,
            } => {
                distance * base_percent / 100.0
                    + amplitude_meters * (2.0 * PI * distance / wavelength_meters).sin()
            }
            TerrainPattern::Steps {
                step_every_meters,
                step_height_meters,
            } => (distance / step_every_meters).floor() * step_height_meters,
        }
    }
}

impl SyntheticTrail {
    /// Generate the elevated path.
    pub fn generate(&self) -> Vec<GpsPoint> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let spacing = self.vertex_spacing_meters.max(0.1);
        let num_segments = (self.length_meters / spacing).ceil() as usize;

        let mut points = Vec::with_capacity(num_segments + 1);
        let mut heading: f64 = rng.gen_range(0.0..(2.0 * PI));
        let mut latitude = self.origin.latitude;
        let mut longitude = self.origin.longitude;

        for i in 0..=num_segments {
            if i > 0 {
                if self.winding {
                    heading += rng.gen_range(-0.2..0.2);
                }
                latitude += meters_to_deg_lat(spacing * heading.sin());
                longitude += meters_to_deg_lng(spacing * heading.cos(), latitude);
            }

            let noise = if self.elevation_noise_meters > 0.0 {
                rng.gen_range(-self.elevation_noise_meters..self.elevation_noise_meters)
            } else {
                0.0
            };
            let elevation =
                self.start_elevation + self.pattern.elevation_at(i as f64 * spacing) + noise;

            points.push(GpsPoint::with_elevation(latitude, longitude, elevation));
        }

        points
    }

    /// Generate a batch of trails with consecutive seeds.
    pub fn generate_many(&self, count: usize) -> Vec<Vec<GpsPoint>> {
        (0..count as u64)
            .map(|i| {
                SyntheticTrail {
                    seed: self.seed.wrapping_add(i),
                    ..self.clone()
                }
                .generate()
            })
            .collect()
    }
}
