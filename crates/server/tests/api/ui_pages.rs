use crate::helpers::{get, record, spawn_app, stored, taipei_coordinates};
use axum::http::StatusCode;
use server::CoordinateCache;
use std::sync::Arc;

#[tokio::test]
async fn dashboard_shows_empty_store_warning() {
    let test_app = spawn_app(Arc::new(stored(vec![])), CoordinateCache::empty()).await;

    let (status, html) = get(&test_app, "/", "text/html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No data. Run `ingest` first."));
    assert!(!html.contains("readings-table"));
}

#[tokio::test]
async fn dashboard_lists_readings_and_areas() {
    let data = stored(vec![
        record("Taipei", "2024-01-01", "20", "12"),
        record("Hualien", "2024-01-01", "23", "17"),
    ]);
    let test_app = spawn_app(Arc::new(data), CoordinateCache::empty()).await;

    let (status, html) = get(&test_app, "/", "text/html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("readings-table"));
    assert!(html.contains(r#"<option value="Taipei">Taipei</option>"#));
    assert!(html.contains(r#"<option value="Hualien">Hualien</option>"#));
    assert!(html.contains("2 records"));
    assert!(html.contains("series-max"));
}

#[tokio::test]
async fn dashboard_area_selector_is_sorted() {
    let data = stored(vec![
        record("Taipei", "2024-01-01", "20", "12"),
        record("Yilan", "2024-01-01", "19", "14"),
        record("Hualien", "2024-01-01", "23", "17"),
    ]);
    let test_app = spawn_app(Arc::new(data), CoordinateCache::empty()).await;

    let (_, html) = get(&test_app, "/", "text/html").await;

    let hualien = html.find(r#"<option value="Hualien">"#).unwrap();
    let taipei = html.find(r#"<option value="Taipei">"#).unwrap();
    let yilan = html.find(r#"<option value="Yilan">"#).unwrap();
    assert!(hualien < taipei);
    assert!(taipei < yilan);
}

#[tokio::test]
async fn pages_render_without_inline_scripts() {
    let data = stored(vec![record("Taipei", "2024-01-01", "20", "12")]);
    let test_app = spawn_app(Arc::new(data), taipei_coordinates()).await;

    for uri in ["/", "/locations"] {
        let (status, html) = get(&test_app, uri, "text/html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("<script"), "{} has an inline script", uri);
    }
}

#[tokio::test]
async fn dashboard_filters_by_selected_area() {
    let data = stored(vec![
        record("Taipei", "2024-01-01", "20", "12"),
        record("Taipei", "2024-01-02", "21", "13"),
        record("Hualien", "2024-01-01", "23", "17"),
    ]);
    let test_app = spawn_app(Arc::new(data), CoordinateCache::empty()).await;

    let (status, html) = get(&test_app, "/?area=Taipei&sort=maxT&order=asc", "text/html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("2 records for"));
    assert!(html.contains(r#"<option value="Taipei" selected>Taipei</option>"#));
    let table = &html[html.find("readings-table").unwrap()..];
    assert!(!table.contains("Hualien"));
    let first = table.find("20.0").unwrap();
    let second = table.find("21.0").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn locations_page_shows_coordinates() {
    let data = stored(vec![record("Taipei", "2024-01-01", "20", "12")]);
    let test_app = spawn_app(Arc::new(data), taipei_coordinates()).await;

    let (status, html) = get(&test_app, "/locations", "text/html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("locations-table"));
    assert!(html.contains("25.0375"));
    assert!(html.contains("121.5637"));
}

#[tokio::test]
async fn locations_page_shows_empty_store_warning() {
    let test_app = spawn_app(Arc::new(stored(vec![])), CoordinateCache::empty()).await;

    let (_, html) = get(&test_app, "/locations", "text/html").await;

    assert!(html.contains("No data. Run `ingest` first."));
}
