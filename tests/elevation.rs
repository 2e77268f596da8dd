//! Tests for elevation data composition and the feature entry point

use trailprofile::{
    ElevationData, ElevationProfile, FeatureGeometry, GeodesicPrimitive, GpsPoint,
    HaversineGeodesic, Pitch, ProfileConfig, ProfileEngine, ProfileError, elevation_data,
    elevation_data_for_feature, profile_from_elevated_path,
};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn red_run() -> Vec<GpsPoint> {
    vec![
        GpsPoint::with_elevation(45.3000, 6.5800, 2400.0),
        GpsPoint::with_elevation(45.3010, 6.5810, 2330.0),
        GpsPoint::with_elevation(45.3020, 6.5815, 2270.0),
        GpsPoint::with_elevation(45.3031, 6.5818, 2285.0),
        GpsPoint::with_elevation(45.3045, 6.5820, 2190.0),
    ]
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

fn line_geometry(path: &[GpsPoint]) -> FeatureGeometry {
    FeatureGeometry::LineString(path.iter().map(GpsPoint::to_position).collect())
}

#[test]
fn test_elevation_data_composes_ascent_and_pitch() {
    let data = elevation_data(&red_run(), &HaversineGeodesic, &ProfileConfig::default()).unwrap();

    assert_eq!(data.ascent_in_meters, 15.0);
    assert_eq!(data.descent_in_meters, 225.0);
    assert_eq!(data.min_elevation_in_meters, 2190.0);
    assert_eq!(data.max_elevation_in_meters, 2400.0);
    assert_eq!(data.vertical_in_meters, 210.0);

    assert!(data.average_pitch_in_percent.is_available());
    assert!(data.max_pitch_in_percent.is_available());
    assert!(data.overall_pitch_in_percent.is_available());
    assert!(
        data.max_pitch_in_percent.value().unwrap()
            >= data.overall_pitch_in_percent.value().unwrap()
    );
    assert!(data.pitch_calculation_resolution_in_meters <= 25.0);
}

#[test]
fn test_feature_with_elevated_line() {
    let geometry = line_geometry(&red_run());
    let data =
        elevation_data_for_feature(&geometry, None, &HaversineGeodesic, &ProfileConfig::default())
            .unwrap()
            .unwrap();
    assert_eq!(data.vertical_in_meters, 210.0);
}

#[test]
fn test_feature_from_geojson() {
    let json = r#"{
        "type": "LineString",
        "coordinates": [
            [6.5800, 45.3000, 2400.0],
            [6.5810, 45.3010, 2330.0],
            [6.5815, 45.3020, 2270.0]
        ]
    }"#;
    let geometry: FeatureGeometry = serde_json::from_str(json).unwrap();
    let path = geometry.line_path().unwrap();
    assert_eq!(path[0], GpsPoint::with_elevation(45.3, 6.58, 2400.0));

    let data =
        elevation_data_for_feature(&geometry, None, &HaversineGeodesic, &ProfileConfig::default())
            .unwrap()
            .unwrap();
    assert_eq!(data.descent_in_meters, 130.0);
}

#[test]
fn test_non_line_geometry_has_no_data() {
    let config = ProfileConfig::default();
    let point = FeatureGeometry::Point(vec![6.58, 45.3, 2400.0]);
    assert_eq!(
        elevation_data_for_feature(&point, None, &HaversineGeodesic, &config).unwrap(),
        None
    );

    let polygon = FeatureGeometry::Polygon(vec![vec![
        vec![6.58, 45.30],
        vec![6.59, 45.30],
        vec![6.59, 45.31],
        vec![6.58, 45.30],
    ]]);
    assert_eq!(
        elevation_data_for_feature(&polygon, None, &HaversineGeodesic, &config).unwrap(),
        None
    );

    let malformed = FeatureGeometry::LineString(vec![vec![6.58], vec![6.59, 45.3]]);
    assert!(malformed.line_path().is_none());
}

#[test]
fn test_flat_line_without_profile_has_no_data() {
    let flat: Vec<GpsPoint> = red_run().iter().map(GpsPoint::without_elevation).collect();
    let geometry = line_geometry(&flat);
    let result =
        elevation_data_for_feature(&geometry, None, &HaversineGeodesic, &ProfileConfig::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_flat_line_with_profile() {
    let config = ProfileConfig::default();
    let run = red_run();
    let profile = profile_from_elevated_path(&run, 10.0, &HaversineGeodesic, &config).unwrap();

    let flat: Vec<GpsPoint> = run.iter().map(GpsPoint::without_elevation).collect();
    let geometry = line_geometry(&flat);
    let data = elevation_data_for_feature(&geometry, Some(&profile), &HaversineGeodesic, &config)
        .unwrap()
        .unwrap();

    // Sampling at boundaries never overshoots the original extrema
    assert!(data.max_elevation_in_meters <= 2400.0 + 1e-9);
    assert!(data.min_elevation_in_meters >= 2190.0 - 1e-9);
    assert!(approx_eq(data.max_elevation_in_meters, 2400.0, 1e-9));
    assert!(approx_eq(data.min_elevation_in_meters, 2190.0, 1e-9));
}

#[test]
fn test_stale_profile_has_no_data() {
    let config = ProfileConfig::default();
    let stale = ElevationProfile {
        heights: vec![2400.0, 2300.0, 2200.0],
        resolution: 10.0,
        target_resolution: 10.0,
    };
    let geometry = line_geometry(&red_run());
    let result = elevation_data_for_feature(&geometry, Some(&stale), &HaversineGeodesic, &config);
    assert_eq!(result, Ok(None));
}

#[test]
fn test_short_run_serialises_null_pitch() {
    let path = vec![
        GpsPoint::with_elevation(45.0, 6.0, 100.0),
        GpsPoint::with_elevation(45.00001, 6.0, 101.0),
    ];
    let data = elevation_data(&path, &HaversineGeodesic, &ProfileConfig::default()).unwrap();
    assert_eq!(data.max_pitch_in_percent, Pitch::Unavailable);

    let json = serde_json::to_value(data).unwrap();
    assert!(json["maxPitchInPercent"].is_null());
    assert!(json["averagePitchInPercent"].is_null());
    assert!(json["overallPitchInPercent"].is_null());
    assert!(json["inclinedLengthInMeters"].as_f64().unwrap() > 0.0);
    assert_eq!(json["ascentInMeters"], 1.0);

    let parsed: ElevationData = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.max_pitch_in_percent, Pitch::Unavailable);
    assert_eq!(parsed.ascent_in_meters, data.ascent_in_meters);
}

#[test]
fn test_batch_preserves_order() {
    let engine = ProfileEngine::new();
    let run = red_run();
    let mut reversed = run.clone();
    reversed.reverse();

    let results = engine.elevation_data_batch(&[run, Vec::new(), reversed]);
    assert_eq!(results.len(), 3);

    let forward = results[0].as_ref().unwrap();
    let backward = results[2].as_ref().unwrap();
    assert!(results[1].is_err());
    assert_eq!(forward.ascent_in_meters, backward.descent_in_meters);
    assert_eq!(forward.descent_in_meters, backward.ascent_in_meters);
}

#[test]
fn test_feature_propagates_sequence_violation() {
    let out_and_back = vec![
        GpsPoint::with_elevation(45.000, 6.0, 1000.0),
        GpsPoint::with_elevation(45.003, 6.0, 1030.0),
        GpsPoint::with_elevation(45.002, 6.0, 1020.0),
    ];
    let result = elevation_data_for_feature(
        &line_geometry(&out_and_back),
        None,
        &SignedGeodesic,
        &ProfileConfig::default(),
    );

    match result {
        Err(err @ ProfileError::ReferenceOrder { .. }) => assert!(err.is_defect()),
        other => panic!("expected ReferenceOrder, got {:?}", other),
    }
}
