//! Tests for distance-based elevation interpolation

use trailprofile::geo_utils::{cumulative_distances, great_circle_point};
use trailprofile::{
    ChunkedPath, GeodesicPrimitive, GpsPoint, HaversineGeodesic, ProfileConfig, ProfileError,
    chunk_path, interpolate_elevations, interpolate_vertices,
};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Haversine distances, negated for legs that head south.
struct SignedGeodesic;

impl GeodesicPrimitive for SignedGeodesic {
    fn distance(&self, a: &GpsPoint, b: &GpsPoint) -> f64 {
        let d = HaversineGeodesic.distance(a, b);
        if b.latitude < a.latitude { -d } else { d }
    }

    fn split(&self, path: &[GpsPoint], chunk_length: f64) -> Vec<Vec<GpsPoint>> {
        HaversineGeodesic.split(path, chunk_length)
    }
}

fn two_chunk_path(midpoint_elevation: Option<f64>) -> (Vec<GpsPoint>, ChunkedPath) {
    let path = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1000.0),
        GpsPoint::with_elevation(45.002, 6.0, 1100.0),
    ];
    let mut midpoint = great_circle_point(&path[0], &path[1], 0.5);
    midpoint.elevation = midpoint_elevation;

    let resolution = HaversineGeodesic.path_length(&path) / 2.0;
    let chunks = vec![vec![path[0], midpoint], vec![midpoint, path[1]]];
    let chunked = ChunkedPath::from_chunks(&path, resolution, chunks);
    (path, chunked)
}

#[test]
fn test_fully_elevated_path_is_unchanged() {
    let path: Vec<GpsPoint> = (0..6)
        .map(|i| GpsPoint::with_elevation(45.0 + i as f64 * 0.0007, 6.0, 1500.0 + (i * i) as f64))
        .collect();
    let result = interpolate_vertices(&path, &HaversineGeodesic).unwrap();
    assert_eq!(result, path);
}

#[test]
fn test_linear_between_endpoints() {
    let mut path: Vec<GpsPoint> = (0..5)
        .map(|i| GpsPoint::new(45.0 + i as f64 * 0.001, 6.0))
        .collect();
    path[0].elevation = Some(100.0);
    path[4].elevation = Some(200.0);

    let result = interpolate_vertices(&path, &HaversineGeodesic).unwrap();
    let distances = cumulative_distances(&path);
    let total = distances[4];

    for (i, vertex) in result.iter().enumerate() {
        let expected = 100.0 + 100.0 * distances[i] / total;
        let actual = vertex.elevation.unwrap();
        assert!(approx_eq(actual, expected, 1e-9), "{}: {} vs {}", i, actual, expected);
    }
    assert!(approx_eq(result[1].elevation.unwrap(), 125.0, 0.01));
    assert!(approx_eq(result[2].elevation.unwrap(), 150.0, 0.01));
    assert!(approx_eq(result[3].elevation.unwrap(), 175.0, 0.01));

    // References themselves are exact
    assert_eq!(result[0].elevation, Some(100.0));
    assert_eq!(result[4].elevation, Some(200.0));
}

#[test]
fn test_each_run_uses_its_own_references() {
    let path = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1000.0),
        GpsPoint::new(45.001, 6.0),
        GpsPoint::with_elevation(45.002, 6.0, 1100.0),
        GpsPoint::new(45.003, 6.0),
        GpsPoint::with_elevation(45.004, 6.0, 1060.0),
    ];
    let result = interpolate_vertices(&path, &HaversineGeodesic).unwrap();

    assert!(approx_eq(result[1].elevation.unwrap(), 1050.0, 0.01));
    assert!(approx_eq(result[3].elevation.unwrap(), 1080.0, 0.01));
}

#[test]
fn test_coincident_references_take_start_elevation() {
    let p = GpsPoint::new(45.0, 6.0);
    let path = vec![
        GpsPoint::with_elevation(p.latitude, p.longitude, 10.0),
        p,
        GpsPoint::with_elevation(p.latitude, p.longitude, 20.0),
    ];
    let result = interpolate_vertices(&path, &HaversineGeodesic).unwrap();
    assert_eq!(result[1].elevation, Some(10.0));
}

#[test]
fn test_vertices_outside_references_stay_empty() {
    let path = vec![
        GpsPoint::new(45.000, 6.0),
        GpsPoint::with_elevation(45.001, 6.0, 1200.0),
        GpsPoint::with_elevation(45.002, 6.0, 1250.0),
        GpsPoint::new(45.003, 6.0),
    ];
    let result = interpolate_vertices(&path, &HaversineGeodesic).unwrap();
    assert!(result[0].elevation.is_none());
    assert!(result[3].elevation.is_none());
}

#[test]
fn test_requires_two_references() {
    let one = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1200.0),
        GpsPoint::new(45.001, 6.0),
    ];
    assert!(matches!(
        interpolate_vertices(&one, &HaversineGeodesic),
        Err(ProfileError::InsufficientReferenceData { found: 1 })
    ));

    let none = vec![GpsPoint::new(45.000, 6.0), GpsPoint::new(45.001, 6.0)];
    assert!(matches!(
        interpolate_vertices(&none, &HaversineGeodesic),
        Err(ProfileError::InsufficientReferenceData { found: 0 })
    ));
}

#[test]
fn test_interpolates_chunked_path() {
    let path = vec![
        GpsPoint::with_elevation(45.2970, 6.5820, 2310.0),
        GpsPoint::with_elevation(45.2981, 6.5834, 2262.0),
        GpsPoint::with_elevation(45.2990, 6.5841, 2240.0),
        GpsPoint::with_elevation(45.3004, 6.5839, 2175.0),
    ];
    let chunked = chunk_path(&path, 25.0, &HaversineGeodesic, &ProfileConfig::default()).unwrap();
    let chunk_count = chunked.len();
    let elevated = interpolate_elevations(chunked, &HaversineGeodesic).unwrap();

    assert_eq!(elevated.len(), chunk_count);
    for vertex in elevated.vertices() {
        let elevation = vertex.elevation.unwrap();
        assert!((2175.0..=2310.0).contains(&elevation));
    }
    for original in &path {
        let vertex = elevated
            .vertices()
            .iter()
            .find(|v| v.same_position(original))
            .unwrap();
        assert_eq!(vertex.elevation, original.elevation);
    }

    // Monotone descent stays monotone after interpolation
    let boundaries = elevated.boundary_points();
    assert!(
        boundaries
            .windows(2)
            .all(|w| w[1].elevation.unwrap() <= w[0].elevation.unwrap())
    );
}

#[test]
fn test_synthetic_vertex_is_filled() {
    let (_, chunked) = two_chunk_path(None);
    assert!(chunked.is_original(0));
    assert!(!chunked.is_original(1));
    assert!(chunked.is_original(2));

    let elevated = interpolate_elevations(chunked, &HaversineGeodesic).unwrap();
    assert!(approx_eq(elevated.vertices()[1].elevation.unwrap(), 1050.0, 1e-6));
}

#[test]
fn test_elevated_synthetic_vertex_fails() {
    let (_, chunked) = two_chunk_path(Some(1100.0));
    let result = interpolate_elevations(chunked, &HaversineGeodesic);
    assert!(matches!(
        result,
        Err(ProfileError::AlreadyElevated {
            index: 1,
            elevation
        }) if elevation == 1100.0
    ));
}

#[test]
fn test_chunker_output_never_trips_the_synthetic_check() {
    let path = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1000.0),
        GpsPoint::with_elevation(45.002, 6.0, 1100.0),
    ];
    let chunked = chunk_path(&path, 25.0, &HaversineGeodesic, &ProfileConfig::default()).unwrap();
    let synthetic = (0..chunked.vertices().len())
        .filter(|&i| !chunked.is_original(i))
        .count();
    assert_eq!(synthetic, chunked.vertices().len() - 2);
    assert!(interpolate_elevations(chunked, &HaversineGeodesic).is_ok());
}

#[test]
fn test_backwards_reference_fails() {
    let path = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1000.0),
        GpsPoint::with_elevation(45.003, 6.0, 1030.0),
        GpsPoint::with_elevation(45.002, 6.0, 1020.0),
    ];
    let result = interpolate_vertices(&path, &SignedGeodesic);
    assert!(matches!(
        result,
        Err(ProfileError::ReferenceOrder { index: 2 })
    ));
}
