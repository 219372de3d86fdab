use maud::{html, Markup};

use crate::{
    templates::{
        fragments::{location_selector, readings_table, temperature_chart, ChartPoint, TableView},
        layouts::{base, CurrentPage, PageConfig},
    },
    Reading,
};

pub const EMPTY_STORE_WARNING: &str = "No data. Run `ingest` first.";

pub struct DashboardData {
    /// Every stored area, in order of first appearance
    pub areas: Vec<String>,
    /// Rows of the current view, already sorted
    pub readings: Vec<Reading>,
    pub chart: Vec<ChartPoint>,
    pub view: TableView,
    /// Number of rows in the store before filtering
    pub total: usize,
    pub error: Option<String>,
}

pub fn dashboard_page(data: &DashboardData) -> Markup {
    let config = PageConfig {
        title: "CWA Daily Temperatures - Dashboard",
        current_page: CurrentPage::Dashboard,
    };

    base(&config, dashboard_content(data))
}

pub fn dashboard_content(data: &DashboardData) -> Markup {
    html! {
        @if let Some(error) = &data.error {
            div class="notification is-danger" {
                strong { "Could not read stored temperatures: " }
                (error)
            }
        } @else if data.total == 0 {
            div class="notification is-warning" { (EMPTY_STORE_WARNING) }
        } @else {
            (location_selector(&data.areas, &data.view))

            h2 class="subtitle is-6" id="record-count" {
                @match &data.view.area {
                    Some(area) => { (data.readings.len()) " records for " strong { (area) } }
                    None => { (data.readings.len()) " records" }
                }
            }

            (temperature_chart(&data.chart))

            div class="box mt-4" {
                (readings_table(&data.readings, &data.view))
            }
        }
    }
}
