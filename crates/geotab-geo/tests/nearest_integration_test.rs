//! Integration tests for the nearest-distance join over files and random inputs

use geotab_core::formats::read_record_set;
use geotab_core::models::{DistanceMetric, Record, RecordSet};
use geotab_geo::metric::{euclidean, haversine_meters};
use geotab_geo::{annotate_nearest, NearestOptions};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn point_set(points: &[(f64, f64)]) -> RecordSet {
    RecordSet::from_records(
        points
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| {
                Record::new().with("id", i as i64).with("latitude", *lat).with("longitude", *lon)
            })
            .collect(),
    )
}

fn coords() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-80.0f64..80.0, -179.0f64..179.0), 1..40)
}

#[test]
fn test_geojson_buildings_against_csv_facilities() {
    let temp_dir = TempDir::new().unwrap();

    let buildings = temp_dir.path().join("buildings.geojson");
    fs::write(
        &buildings,
        r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[36.0, 37.0], [36.2, 37.0], [36.2, 37.2], [36.0, 37.2], [36.0, 37.0]]]
                },
                "properties": {"building": "b1", "damage": "high"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [38.0, 39.0]},
                "properties": {"building": "b2", "damage": "low"}
            }
        ]
    }"#,
    )
    .unwrap();

    let facilities = temp_dir.path().join("facilities.csv");
    fs::write(&facilities, "name,latitude,longitude\nclinic,37.1,36.1\nschool,39.0,38.5\n").unwrap();

    let query = read_record_set(&buildings).unwrap();
    let reference = read_record_set(&facilities).unwrap();

    let join = annotate_nearest(&query, &reference, &NearestOptions::default()).unwrap();

    assert_eq!(join.query.len(), 2);
    assert_eq!(join.matches, vec![0, 1]);

    let distances = join.distances("nearest_distance");
    assert!(distances[0].unwrap() < 1e-9, "polygon centroid sits on the clinic");
    assert!((distances[1].unwrap() - 0.5).abs() < 1e-9);

    // derived columns travel with the annotated copy
    assert!(join.query.has_column("latitude"));
    assert!(join.query.has_column("longitude"));
    assert!(join.query.has_geometry());
}

#[test]
fn test_csv_without_coordinates_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plain.csv");
    fs::write(&path, "id,damage\n1,high\n").unwrap();

    let plain = read_record_set(&path).unwrap();
    let reference = point_set(&[(0.0, 0.0)]);

    let err = annotate_nearest(&plain, &reference, &NearestOptions::default()).unwrap_err();
    assert!(err.to_string().contains("query"));
}

proptest! {
    #[test]
    fn prop_indexed_distance_matches_brute_force(query in coords(), reference in coords()) {
        let join = annotate_nearest(
            &point_set(&query),
            &point_set(&reference),
            &NearestOptions::default(),
        )
        .unwrap();

        let distances = join.distances("nearest_distance");
        prop_assert_eq!(join.query.len(), query.len());
        prop_assert_eq!(join.matches.len(), query.len());

        for (i, (lat, lon)) in query.iter().enumerate() {
            let brute = reference
                .iter()
                .map(|(rlat, rlon)| euclidean([*lat, *lon], [*rlat, *rlon]))
                .fold(f64::INFINITY, f64::min);
            let got = distances[i].unwrap();

            prop_assert!(got >= 0.0);
            prop_assert!((got - brute).abs() < 1e-9);
            prop_assert_eq!(join.query.records[i].get("id"), Some(&serde_json::json!(i as i64)));
        }
    }

    #[test]
    fn prop_haversine_matches_geo_between_matched_pair(query in coords(), reference in coords()) {
        let options = NearestOptions::new().with_metric(DistanceMetric::Haversine);
        let join = annotate_nearest(&point_set(&query), &point_set(&reference), &options).unwrap();
        let distances = join.distances("nearest_distance");

        for (i, (lat, lon)) in query.iter().enumerate() {
            let (rlat, rlon) = reference[join.matches[i]];
            let expected = haversine_meters([*lat, *lon], [rlat, rlon]);
            let brute = reference
                .iter()
                .map(|(a, b)| haversine_meters([*lat, *lon], [*a, *b]))
                .fold(f64::INFINITY, f64::min);
            let got = distances[i].unwrap();

            prop_assert!(got >= 0.0);
            prop_assert!((got - expected).abs() < 1e-6);
            prop_assert!((got - brute).abs() < 1e-3);
        }
    }

    #[test]
    fn prop_self_join_is_zero(points in coords()) {
        let set = point_set(&points);
        let join = annotate_nearest(&set, &set, &NearestOptions::default()).unwrap();

        for distance in join.distances("nearest_distance") {
            prop_assert_eq!(distance, Some(0.0));
        }
    }
}
