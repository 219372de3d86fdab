use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{Query, State},
    response::Html,
};
use log::error;
use serde::Deserialize;

use crate::{
    templates::{
        dashboard_page, fragments::chart_points, DashboardData, SortKey, SortOrder, TableView,
    },
    AppState, Reading,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub area: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl DashboardQuery {
    fn view(&self) -> TableView {
        TableView {
            area: self.area.clone().filter(|a| !a.is_empty() && a != "All"),
            sort: SortKey::parse(self.sort.as_deref()),
            order: SortOrder::parse(self.order.as_deref()),
        }
    }
}

/// Handler for the dashboard page (GET /)
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let data = build_dashboard_data(&state, query.view()).await;
    Html(dashboard_page(&data).into_string())
}

async fn build_dashboard_data(state: &Arc<AppState>, view: TableView) -> DashboardData {
    let readings = match state.queries.readings().await {
        Ok(readings) => readings,
        Err(e) => {
            error!("error loading dashboard readings: {}", e);
            return DashboardData {
                areas: vec![],
                readings: vec![],
                chart: vec![],
                view,
                total: 0,
                error: Some(e.to_string()),
            };
        }
    };

    let total = readings.len();
    let areas = distinct_areas(&readings);

    let mut shown: Vec<Reading> = match &view.area {
        Some(area) => readings.into_iter().filter(|r| &r.area == area).collect(),
        None => readings,
    };
    let chart = chart_points(&shown);
    view.sort(&mut shown);

    DashboardData {
        areas,
        readings: shown,
        chart,
        view,
        total,
        error: None,
    }
}

fn distinct_areas(readings: &[Reading]) -> Vec<String> {
    readings
        .iter()
        .map(|r| r.area.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
