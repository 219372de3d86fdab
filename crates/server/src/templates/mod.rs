pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{ChartPoint, SortKey, SortOrder, TableView};
pub use layouts::{CurrentPage, PageConfig};
pub use pages::{dashboard::DashboardData, dashboard_page, locations_page};
