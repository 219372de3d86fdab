mod location_selector;
mod locations_table;
mod readings_table;
mod temperature_chart;

pub use location_selector::location_selector;
pub use locations_table::locations_table;
pub use readings_table::{readings_table, SortKey, SortOrder, TableView};
pub use temperature_chart::{chart_points, temperature_chart, ChartPoint};
