use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};
use std::{str::FromStr, time::Duration};

use crate::{fs::ensure_parent_dir, ForecastRecord};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS temperature_daily(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        area TEXT,
        date TEXT,
        maxT TEXT,
        minT TEXT
    )";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// The `temperature_daily` table.
///
/// Rows are only ever appended; nothing here updates or deletes.
#[derive(Clone)]
pub struct TemperatureStore {
    pool: SqlitePool,
}

impl TemperatureStore {
    /// Open (creating if missing) a database file for writing
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        ensure_parent_dir(path)?;
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|source| StoreError::Connect {
                path: path.to_string(),
                source,
            })?;

        info!("SQLite database opened at: {}", path);
        Ok(Self { pool })
    }

    /// Open an existing database file without write access
    pub async fn open_read_only(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|source| StoreError::Connect {
                path: path.to_string(),
                source,
            })?;

        info!("SQLite database opened read-only at: {}", path);
        Ok(Self { pool })
    }

    /// A private in-memory database, schema included
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // every connection to :memory: is its own database, so pin exactly one
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|source| StoreError::Connect {
                path: ":memory:".to_string(),
                source,
            })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create `temperature_daily` if it does not exist yet. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert every record in one transaction; all rows commit or none do.
    ///
    /// No uniqueness is enforced, repeated runs accumulate duplicate
    /// (area, date) rows.
    pub async fn append_records(&self, records: &[ForecastRecord]) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for record in records {
            let result =
                sqlx::query("INSERT INTO temperature_daily(area, date, maxT, minT) VALUES (?, ?, ?, ?)")
                    .bind(&record.area)
                    .bind(&record.date)
                    .bind(record.max_t.as_deref())
                    .bind(record.min_t.as_deref())
                    .execute(&mut *tx)
                    .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Every stored row in insertion order
    pub async fn all_records(&self) -> Result<Vec<ForecastRecord>, StoreError> {
        let rows = sqlx::query("SELECT area, date, maxT, minT FROM temperature_daily ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(ForecastRecord {
                area: row.try_get::<Option<String>, _>("area")?.unwrap_or_default(),
                date: row.try_get::<Option<String>, _>("date")?.unwrap_or_default(),
                max_t: row.try_get("maxT")?,
                min_t: row.try_get("minT")?,
            });
        }
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM temperature_daily")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taipei(date: &str, max: &str, min: &str) -> ForecastRecord {
        ForecastRecord::new(
            "Taipei",
            date,
            Some(max.to_string()),
            Some(min.to_string()),
        )
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn appended_rows_read_back_in_order() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        let records = vec![
            taipei("2024-01-01", "20", "12"),
            ForecastRecord::new("Hualien", "2024-01-01", None, Some("15".to_string())),
        ];

        let written = store.append_records(&records).await.unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.all_records().await.unwrap(), records);
    }

    #[tokio::test]
    async fn repeated_appends_accumulate_duplicates() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        let records = vec![taipei("2024-01-01", "20", "12")];

        store.append_records(&records).await.unwrap();
        store.append_records(&records).await.unwrap();

        let stored = store.all_records().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], stored[1]);
    }

    #[tokio::test]
    async fn empty_batch_writes_nothing() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        assert_eq!(store.append_records(&[]).await.unwrap(), 0);
        assert!(store.all_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_rows() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        store
            .append_records(&[taipei("2024-01-01", "20", "12")])
            .await
            .unwrap();

        // make the second insert of the next batch fail
        sqlx::query(
            "CREATE TRIGGER reject_bad BEFORE INSERT ON temperature_daily
             WHEN NEW.area = 'bad' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let batch = vec![
            taipei("2024-01-02", "21", "13"),
            ForecastRecord::new("bad", "2024-01-02", None, None),
        ];
        assert!(store.append_records(&batch).await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn file_store_round_trips_and_reopens_read_only() {
        let dir = std::env::temp_dir().join(format!("cwa-store-{}", std::process::id()));
        let path = dir.join("temps.db");
        let path_str = path.to_str().unwrap().to_string();

        let store = TemperatureStore::open(&path_str).await.unwrap();
        store.ensure_schema().await.unwrap();
        store
            .append_records(&[taipei("2024-01-01", "20", "12")])
            .await
            .unwrap();
        store.close().await;

        let reader = TemperatureStore::open_read_only(&path_str).await.unwrap();
        assert_eq!(reader.all_records().await.unwrap().len(), 1);
        assert!(reader
            .append_records(&[taipei("2024-01-02", "21", "13")])
            .await
            .is_err());
        reader.close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }
}
