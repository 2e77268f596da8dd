//! Patched line chunking.
//!
//! Splits a path into an integer number of equal-length chunks using a
//! [`GeodesicPrimitive`], then repairs the primitive's known artifacts:
//!
//! 1. a trailing chunk shorter than `short_chunk_fraction` of the resolution
//!    is a floating-point leftover and is dropped;
//! 2. the final vertex is pinned to the exact last vertex of the input, so
//!    equality-based "is this an original vertex" checks keep working;
//! 3. synthetic vertices lose any elevation the primitive attached to them.
//!
//! All three corrections are no-ops on a primitive without those defects.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{ProfileError, Result};
use crate::geodesic::GeodesicPrimitive;
use crate::resolution::{fit_length, segment_count};
use crate::{GpsPoint, ProfileConfig};

/// A path split into consecutive chunks.
///
/// Vertices are stored once in an arena; each chunk is an inclusive index
/// range into it. Adjacent chunks share their boundary vertex.
/// Every vertex is flagged as original (its position matches a vertex of
/// the source path) or synthetic.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkedPath {
    resolution: f64,
    vertices: Vec<GpsPoint>,
    original: Vec<bool>,
    ranges: Vec<(usize, usize)>,
}

impl ChunkedPath {
    /// Assemble chunks whose boundaries coincide, as returned by a
    /// splitting primitive for `path`.
    ///
    /// No corrections are applied: vertices keep whatever elevation the
    /// chunks carry. Use [`chunk_path`] for the repaired chunking.
    pub fn from_chunks(path: &[GpsPoint], resolution: f64, chunks: Vec<Vec<GpsPoint>>) -> Self {
        let mut vertices: Vec<GpsPoint> = Vec::new();
        let mut ranges = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let mut iter = chunk.into_iter().peekable();
            let start = match (vertices.last(), iter.peek()) {
                (Some(last), Some(first)) if last.same_position(first) => {
                    iter.next();
                    vertices.len() - 1
                }
                _ => vertices.len(),
            };
            vertices.extend(iter);
            if vertices.is_empty() {
                continue;
            }
            ranges.push((start, vertices.len() - 1));
        }

        let originals: HashSet<(u64, u64)> = path.iter().map(GpsPoint::position_key).collect();
        let original = vertices
            .iter()
            .map(|v| originals.contains(&v.position_key()))
            .collect();

        Self {
            resolution,
            vertices,
            original,
            ranges,
        }
    }

    /// Horizontal spacing actually used between chunk boundaries, in meters.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Vertices of chunk `index`, boundary vertices included.
    pub fn chunk(&self, index: usize) -> Option<&[GpsPoint]> {
        self.ranges
            .get(index)
            .map(|&(start, end)| &self.vertices[start..=end])
    }

    pub fn chunks(&self) -> impl Iterator<Item = &[GpsPoint]> + '_ {
        self.ranges
            .iter()
            .map(|&(start, end)| &self.vertices[start..=end])
    }

    /// All vertices in path order, shared boundaries listed once.
    pub fn vertices(&self) -> &[GpsPoint] {
        &self.vertices
    }

    /// Whether vertex `index` of [`vertices`](Self::vertices) is a vertex
    /// of the source path.
    pub fn is_original(&self, index: usize) -> bool {
        self.original.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn original_flags(&self) -> &[bool] {
        &self.original
    }

    /// Replace the vertex arena with a same-length sequence (e.g. after
    /// interpolation), keeping chunk ranges.
    pub(crate) fn with_vertices(self, vertices: Vec<GpsPoint>) -> Self {
        debug_assert_eq!(vertices.len(), self.vertices.len());
        Self { vertices, ..self }
    }

    /// First vertex of every chunk followed by the last vertex of the last
    /// chunk. These are the sampling points of an elevation profile.
    pub fn boundary_points(&self) -> Vec<GpsPoint> {
        let mut points: Vec<GpsPoint> = self
            .ranges
            .iter()
            .map(|&(start, _)| self.vertices[start])
            .collect();
        if let Some(&(_, end)) = self.ranges.last() {
            points.push(self.vertices[end]);
        }
        points
    }

    /// Owned copy of every chunk.
    pub fn to_chunks(&self) -> Vec<Vec<GpsPoint>> {
        self.chunks().map(|c| c.to_vec()).collect()
    }
}

/// Split `path` into equal chunks no longer than `min_resolution` meters.
///
/// Fails only for an empty path or an unusable resolution. A path of zero
/// length yields a single degenerate chunk and a resolution of `0.0`.
pub fn chunk_path<G: GeodesicPrimitive + ?Sized>(
    path: &[GpsPoint],
    min_resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) -> Result<ChunkedPath> {
    if path.is_empty() {
        return Err(ProfileError::EmptyPath);
    }
    if !min_resolution.is_finite() || min_resolution <= 0.0 {
        return Err(ProfileError::InvalidResolution(min_resolution));
    }

    let total_length = geodesic.path_length(path);
    let resolution = fit_length(total_length, min_resolution);
    if resolution == 0.0 {
        return Ok(ChunkedPath::from_chunks(path, 0.0, vec![path.to_vec()]));
    }

    let mut chunks = geodesic.split(path, resolution);
    if chunks.is_empty() {
        return Ok(ChunkedPath::from_chunks(path, resolution, vec![path.to_vec()]));
    }

    drop_short_last_chunk(&mut chunks, resolution, geodesic, config);
    pin_last_vertex(&mut chunks, path, resolution, geodesic, config);

    let mut chunked = ChunkedPath::from_chunks(path, resolution, chunks);
    strip_synthetic_elevation(&mut chunked);

    debug!(
        "[Chunker] {:.1}m path -> {} chunks of {:.3}m (expected {})",
        total_length,
        chunked.len(),
        resolution,
        segment_count(total_length, resolution)
    );

    Ok(chunked)
}

/// Drop a trailing chunk that is only a floating-point leftover.
/// Its end vertex replaces the previous chunk's end.
fn drop_short_last_chunk<G: GeodesicPrimitive + ?Sized>(
    chunks: &mut Vec<Vec<GpsPoint>>,
    resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) {
    if chunks.len() < 2 {
        return;
    }
    let last_length = chunks
        .last()
        .map(|c| geodesic.path_length(c))
        .unwrap_or(0.0);
    if last_length >= resolution * config.short_chunk_fraction {
        return;
    }

    if let Some(dropped) = chunks.pop() {
        debug!(
            "[Chunker] Dropped {:.6}m trailing chunk (resolution {:.3}m)",
            last_length, resolution
        );
        if let (Some(prev), Some(end)) = (chunks.last_mut(), dropped.last()) {
            if let Some(prev_end) = prev.last_mut() {
                *prev_end = *end;
            }
        }
    }
}

/// Make the last vertex bit-identical to the input's last vertex.
fn pin_last_vertex<G: GeodesicPrimitive + ?Sized>(
    chunks: &mut [Vec<GpsPoint>],
    path: &[GpsPoint],
    resolution: f64,
    geodesic: &G,
    config: &ProfileConfig,
) {
    let (Some(target), Some(last_chunk)) = (path.last(), chunks.last_mut()) else {
        return;
    };
    let Some(end) = last_chunk.last_mut() else {
        return;
    };

    let offset = geodesic.distance(end, target);
    if offset > resolution * config.endpoint_snap_fraction {
        warn!(
            "[Chunker] Last chunk ends {:.3}m from path end (resolution {:.3}m), pinning anyway",
            offset, resolution
        );
    }
    *end = *target;
}

/// Remove elevation from every vertex that is not an original path vertex.
fn strip_synthetic_elevation(chunked: &mut ChunkedPath) {
    let mut stripped = 0usize;
    for (vertex, &original) in chunked.vertices.iter_mut().zip(&chunked.original) {
        if !original && vertex.elevation.is_some() {
            vertex.elevation = None;
            stripped += 1;
        }
    }
    if stripped > 0 {
        debug!("[Chunker] Stripped elevation from {} synthetic vertices", stripped);
    }
}
