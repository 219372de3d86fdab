use crate::{
    area_history, dashboard_handler, locations, locations_handler, routes, CoordinateCache,
    DuplicatePolicy, ErrorBody, LatestReading, Reading, TemperatureAccess, TemperatureData,
    TemperatureQueries,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use cwa_temperature_core::{CwaFetcher, FetchSettings, ForecastSource};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub queries: Arc<TemperatureQueries>,
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::api::locations, routes::api::area_history),
    components(schemas(LatestReading, Reading, ErrorBody)),
    tags(
        (name = "cwa temperature api", description = "daily max/min temperature forecasts collected from the CWA open data service")
    )
)]
struct ApiDoc;

pub fn build_app_state(
    static_dir: String,
    db_path: String,
    fetch_settings: FetchSettings,
    duplicates: DuplicatePolicy,
) -> Result<AppState, anyhow::Error> {
    let fetcher: Arc<dyn ForecastSource> = Arc::new(
        CwaFetcher::new(fetch_settings)
            .map_err(|e| anyhow!("error setting up upstream client: {}", e))?,
    );
    let data: Arc<dyn TemperatureData> = Arc::new(TemperatureAccess::new(db_path));
    let coordinates = Arc::new(CoordinateCache::new(fetcher));

    Ok(AppState {
        static_dir,
        queries: Arc::new(TemperatureQueries::new(data, coordinates, duplicates)),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        // UI routes
        .route("/", get(dashboard_handler))
        .route("/locations", get(locations_handler))
        // API routes
        .route("/api/locations", get(locations))
        .route("/api/area", get(area_history))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .nest_service("/static", serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_string();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
