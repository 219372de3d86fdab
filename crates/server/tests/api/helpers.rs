use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use cwa_temperature_core::ForecastRecord;
use hyper::{header, Method};
use mockall::mock;
use server::{
    app, db, AppState, Coordinate, CoordinateCache, CoordinateMap, DuplicatePolicy,
    TemperatureData, TemperatureQueries,
};
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub TemperatureAccess {}

    #[async_trait]
    impl TemperatureData for TemperatureAccess {
        async fn records(&self) -> Result<Vec<ForecastRecord>, db::Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(data: Arc<dyn TemperatureData>, coordinates: CoordinateCache) -> TestApp {
    let queries = TemperatureQueries::new(data, Arc::new(coordinates), DuplicatePolicy::KeepAll);
    let app_state = AppState {
        static_dir: String::from("./static"),
        queries: Arc::new(queries),
    };

    TestApp { app: app(app_state) }
}

/// A store mock that always answers with `records`
pub fn stored(records: Vec<ForecastRecord>) -> MockTemperatureAccess {
    let mut data = MockTemperatureAccess::new();
    data.expect_records().returning(move || Ok(records.clone()));
    data
}

pub fn record(area: &str, date: &str, max: &str, min: &str) -> ForecastRecord {
    ForecastRecord::new(area, date, Some(max.to_string()), Some(min.to_string()))
}

pub fn taipei_coordinates() -> CoordinateCache {
    let mut map = CoordinateMap::new();
    map.insert(
        "Taipei".to_string(),
        Coordinate {
            lat: 25.0375,
            lon: 121.5637,
        },
    );
    CoordinateCache::seeded(map)
}

pub async fn get(test_app: &TestApp, uri: &str, accept: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, accept)
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
