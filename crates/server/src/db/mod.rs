mod readings;
mod temperature_data;

pub use readings::*;
pub use temperature_data::*;
