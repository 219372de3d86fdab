//! CWA Temperature Core Library
//!
//! Shared pieces for the ingest job and the read server:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - The upstream forecast fetcher
//! - The `temperature_daily` store

mod config;
pub mod fetcher;
pub mod fs;
pub mod record;
pub mod store;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fetcher::{CwaFetcher, FetchError, FetchSettings, ForecastSource};
pub use fs::{ensure_parent_dir, path_exists};
pub use record::ForecastRecord;
pub use store::{StoreError, TemperatureStore};

/// Application name used for XDG paths
pub const APP_NAME: &str = "cwa-temperature";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 9800;

/// Default location of the SQLite database
pub const DEFAULT_DB_PATH: &str = "./sqlitedata.db";

/// Agricultural weather forecast dataset (F-A0010-001)
pub const DEFAULT_CWA_URL: &str = "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001";

/// Default upstream request timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT: u64 = 10;
