//! Tests for ascent/descent accumulation

use trailprofile::{GpsPoint, ProfileError, accumulate};

fn path_with_elevations(elevations: &[f64]) -> Vec<GpsPoint> {
    elevations
        .iter()
        .enumerate()
        .map(|(i, &e)| GpsPoint::with_elevation(45.0 + i as f64 * 0.001, 6.0, e))
        .collect()
}

#[test]
fn test_monotonic_climb() {
    let data = accumulate(&path_with_elevations(&[100.0, 150.0, 200.0])).unwrap();
    assert_eq!(data.ascent, 100.0);
    assert_eq!(data.descent, 0.0);
    assert_eq!(data.min, 100.0);
    assert_eq!(data.max, 200.0);
    assert_eq!(data.vertical, 100.0);
}

#[test]
fn test_undulating_path() {
    let data = accumulate(&path_with_elevations(&[100.0, 150.0, 130.0, 180.0])).unwrap();
    assert_eq!(data.ascent, 100.0);
    assert_eq!(data.descent, 20.0);
    assert_eq!(data.min, 100.0);
    assert_eq!(data.max, 180.0);
    assert_eq!(data.vertical, 80.0);
}

#[test]
fn test_descent_is_independent_of_ascent() {
    // Net change is zero but both totals accumulate
    let data = accumulate(&path_with_elevations(&[2000.0, 1900.0, 2000.0])).unwrap();
    assert_eq!(data.ascent, 100.0);
    assert_eq!(data.descent, 100.0);
    assert_eq!(data.vertical, 100.0);
}

#[test]
fn test_single_vertex() {
    let data = accumulate(&path_with_elevations(&[1234.0])).unwrap();
    assert_eq!(data.ascent, 0.0);
    assert_eq!(data.descent, 0.0);
    assert_eq!(data.min, 1234.0);
    assert_eq!(data.max, 1234.0);
    assert_eq!(data.vertical, 0.0);
}

#[test]
fn test_empty_path() {
    assert!(matches!(accumulate(&[]), Err(ProfileError::EmptyPath)));
}

#[test]
fn test_missing_elevation() {
    let mut path = path_with_elevations(&[100.0, 150.0, 130.0]);
    path[0].elevation = None;
    assert!(matches!(
        accumulate(&path),
        Err(ProfileError::MissingElevation { index: 0 })
    ));

    let mut path = path_with_elevations(&[100.0, 150.0, 130.0]);
    path[2].elevation = None;
    assert!(matches!(
        accumulate(&path),
        Err(ProfileError::MissingElevation { index: 2 })
    ));
}
