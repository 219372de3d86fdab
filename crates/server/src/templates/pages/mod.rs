pub mod dashboard;
pub mod locations;

pub use dashboard::dashboard_page;
pub use locations::locations_page;
