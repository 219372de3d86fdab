mod dashboard;
mod locations;

pub use dashboard::{dashboard_handler, DashboardQuery};
pub use locations::locations_handler;
