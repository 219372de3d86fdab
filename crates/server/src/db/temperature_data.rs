use async_trait::async_trait;
use cwa_temperature_core::{path_exists, ForecastRecord, StoreError, TemperatureStore};
use log::debug;
use tokio::sync::OnceCell;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read temperature store: {0}")]
    Store(#[from] StoreError),
}

/// Read access to the rows written by the ingest job
#[async_trait]
pub trait TemperatureData: Send + Sync {
    /// Every stored record in insertion order
    async fn records(&self) -> Result<Vec<ForecastRecord>, Error>;
}

/// Opens the SQLite file lazily and read-only.
///
/// A database that has not been created yet reads as empty, so the server
/// can start before the first ingest run.
pub struct TemperatureAccess {
    db_path: String,
    store: OnceCell<TemperatureStore>,
}

impl TemperatureAccess {
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            store: OnceCell::new(),
        }
    }
}

#[async_trait]
impl TemperatureData for TemperatureAccess {
    async fn records(&self) -> Result<Vec<ForecastRecord>, Error> {
        if !path_exists(&self.db_path) {
            debug!("database {} does not exist yet", self.db_path);
            return Ok(vec![]);
        }

        let store = self
            .store
            .get_or_try_init(|| TemperatureStore::open_read_only(&self.db_path))
            .await?;
        Ok(store.all_records().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_database_reads_as_empty() {
        let access = TemperatureAccess::new("/nonexistent/cwa/sqlitedata.db".to_string());
        assert!(access.records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_rows_written_by_ingest() {
        let dir = std::env::temp_dir().join(format!("cwa-access-{}", std::process::id()));
        let path = dir.join("temps.db").to_string_lossy().to_string();

        let writer = TemperatureStore::open(&path).await.unwrap();
        writer.ensure_schema().await.unwrap();
        writer
            .append_records(&[ForecastRecord::new(
                "Taipei",
                "2024-01-01",
                Some("20".to_string()),
                Some("12".to_string()),
            )])
            .await
            .unwrap();
        writer.close().await;

        let access = TemperatureAccess::new(path);
        let records = access.records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].area, "Taipei");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
