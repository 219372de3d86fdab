pub mod aggregation;
pub mod coordinates;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use aggregation::*;
pub use coordinates::*;
pub use db::{Reading, TemperatureAccess, TemperatureData};
pub use routes::*;
pub use startup::*;
pub use utils::*;
