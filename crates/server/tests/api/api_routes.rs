use crate::helpers::{get, record, spawn_app, stored, taipei_coordinates};
use axum::http::StatusCode;
use serde_json::{json, Value};
use server::CoordinateCache;
use std::sync::Arc;

#[tokio::test]
async fn locations_is_empty_for_empty_store() {
    let test_app = spawn_app(Arc::new(stored(vec![])), CoordinateCache::empty()).await;

    let (status, body) = get(&test_app, "/api/locations", "application/json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn locations_returns_latest_reading_per_area_with_coordinates() {
    let data = stored(vec![
        record("Taipei", "2024-01-01", "20", "12"),
        record("Hualien", "2024-01-01", "23", "17"),
        record("Taipei", "2024-01-02", "22", "13"),
    ]);
    let test_app = spawn_app(Arc::new(data), taipei_coordinates()).await;

    let (status, body) = get(&test_app, "/api/locations", "application/json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!([
            {
                "area": "Taipei",
                "date": "2024-01-02T00:00:00",
                "maxT": 22.0,
                "minT": 13.0,
                "lat": 25.0375,
                "lon": 121.5637
            },
            {
                "area": "Hualien",
                "date": "2024-01-01T00:00:00",
                "maxT": 23.0,
                "minT": 17.0,
                "lat": null,
                "lon": null
            }
        ])
    );
}

#[tokio::test]
async fn area_without_parameter_is_a_client_error() {
    let test_app = spawn_app(Arc::new(stored(vec![])), CoordinateCache::empty()).await;

    let (status, body) = get(&test_app, "/api/area", "application/json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "missing area parameter" })
    );
}

#[tokio::test]
async fn area_with_empty_parameter_is_a_client_error() {
    let test_app = spawn_app(Arc::new(stored(vec![])), CoordinateCache::empty()).await;

    let (status, _) = get(&test_app, "/api/area?area=", "application/json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn area_history_is_filtered_and_ascending() {
    let data = stored(vec![
        record("Taipei", "2024-01-03", "23", "14"),
        record("Hualien", "2024-01-01", "25", "18"),
        record("Taipei", "2024-01-01", "20", "12"),
        record("Taipei", "2024-01-02", "bad", "13"),
    ]);
    let test_app = spawn_app(Arc::new(data), CoordinateCache::empty()).await;

    let (status, body) = get(&test_app, "/api/area?area=Taipei", "application/json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!([
            { "area": "Taipei", "date": "2024-01-01T00:00:00", "maxT": 20.0, "minT": 12.0 },
            { "area": "Taipei", "date": "2024-01-02T00:00:00", "maxT": null, "minT": 13.0 },
            { "area": "Taipei", "date": "2024-01-03T00:00:00", "maxT": 23.0, "minT": 14.0 }
        ])
    );
}

#[tokio::test]
async fn unknown_area_returns_empty_history() {
    let data = stored(vec![record("Taipei", "2024-01-01", "20", "12")]);
    let test_app = spawn_app(Arc::new(data), CoordinateCache::empty()).await;

    let (status, body) = get(&test_app, "/api/area?area=Kinmen", "application/json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}
