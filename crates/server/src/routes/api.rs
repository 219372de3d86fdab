use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::{AppState, LatestReading, QueryError, Reading};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AreaQuery {
    /// Location name exactly as stored, e.g. "Taipei"
    pub area: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Error response of the JSON API, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let status = match err {
            QueryError::MissingArea => StatusCode::BAD_REQUEST,
            QueryError::Data(ref e) => {
                error!("error reading temperature data: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = OK, description = "Most recent reading of every area, joined with its coordinates when known", body = Vec<LatestReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the temperature store", body = ErrorBody)
    ))]
pub async fn locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LatestReading>>, ApiError> {
    state
        .queries
        .list_latest_per_area()
        .await
        .map(Json)
        .map_err(ApiError::from)
}

#[utoipa::path(
    get,
    path = "/api/area",
    params(AreaQuery),
    responses(
        (status = OK, description = "Every reading of the area, oldest first", body = Vec<Reading>),
        (status = BAD_REQUEST, description = "The area parameter was not provided", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the temperature store", body = ErrorBody)
    ))]
pub async fn area_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaQuery>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    state
        .queries
        .list_history_for_area(query.area.as_deref())
        .await
        .map(Json)
        .map_err(ApiError::from)
}
