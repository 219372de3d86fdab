use std::sync::Arc;

use axum::{extract::State, response::Html};
use log::error;

use crate::{templates::locations_page, AppState};

/// Handler for the locations page (GET /locations)
pub async fn locations_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.queries.list_latest_per_area().await {
        Ok(latest) => Html(locations_page(&latest, None).into_string()),
        Err(e) => {
            error!("error loading latest readings: {}", e);
            Html(locations_page(&[], Some(&e.to_string())).into_string())
        }
    }
}
