//! Distance-based elevation interpolation.
//!
//! Original vertices that carry elevation are reference points and are never
//! modified. Synthetic vertices created by splitting must arrive without
//! elevation; one that still has it is a sequence violation. Every run of
//! vertices strictly between two consecutive reference points gets
//! elevation by linear interpolation over cumulative geodesic distance.
//! Vertices before the first or after the last reference point are left
//! without elevation.

use log::debug;

use crate::GpsPoint;
use crate::chunking::ChunkedPath;
use crate::error::{ProfileError, Result};
use crate::geodesic::GeodesicPrimitive;

/// Fill missing elevations across all chunk vertices.
///
/// Only original vertices are reference points. A synthetic vertex that
/// still carries elevation fails with [`ProfileError::AlreadyElevated`].
/// Returns a new [`ChunkedPath`] with the same chunk layout.
pub fn interpolate_elevations<G: GeodesicPrimitive + ?Sized>(
    chunked: ChunkedPath,
    geodesic: &G,
) -> Result<ChunkedPath> {
    let vertices = interpolate_marked(chunked.vertices(), chunked.original_flags(), geodesic)?;
    Ok(chunked.with_vertices(vertices))
}

/// Fill missing elevations of an ordered vertex sequence in which every
/// vertex counts as original.
pub fn interpolate_vertices<G: GeodesicPrimitive + ?Sized>(
    vertices: &[GpsPoint],
    geodesic: &G,
) -> Result<Vec<GpsPoint>> {
    interpolate_marked(vertices, &vec![true; vertices.len()], geodesic)
}

fn interpolate_marked<G: GeodesicPrimitive + ?Sized>(
    vertices: &[GpsPoint],
    original: &[bool],
    geodesic: &G,
) -> Result<Vec<GpsPoint>> {
    if let Some((index, elevation)) = vertices
        .iter()
        .zip(original)
        .enumerate()
        .find_map(|(i, (v, &orig))| v.elevation.filter(|_| !orig).map(|e| (i, e)))
    {
        return Err(ProfileError::AlreadyElevated { index, elevation });
    }

    let mut distances = Vec::with_capacity(vertices.len());
    let mut total = 0.0;
    for (i, vertex) in vertices.iter().enumerate() {
        if i > 0 {
            total += geodesic.distance(&vertices[i - 1], vertex);
        }
        distances.push(total);
    }

    let references: Vec<(usize, f64)> = vertices
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.elevation.map(|e| (i, e)))
        .collect();
    if references.len() < 2 {
        return Err(ProfileError::InsufficientReferenceData {
            found: references.len(),
        });
    }

    let mut out = vertices.to_vec();
    let mut filled = 0usize;

    for pair in references.windows(2) {
        let (start_idx, start_elevation) = pair[0];
        let (end_idx, end_elevation) = pair[1];
        let start_distance = distances[start_idx];
        let end_distance = distances[end_idx];
        if end_distance < start_distance {
            return Err(ProfileError::ReferenceOrder { index: end_idx });
        }
        let span = end_distance - start_distance;

        for k in (start_idx + 1)..end_idx {
            let elevation = if span == 0.0 {
                start_elevation
            } else {
                start_elevation
                    + (end_elevation - start_elevation) * (distances[k] - start_distance) / span
            };
            out[k].elevation = Some(elevation);
            filled += 1;
        }
    }

    debug!(
        "[Interpolate] {} reference points, {} vertices filled",
        references.len(),
        filled
    );
    Ok(out)
}
