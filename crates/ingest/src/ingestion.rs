use cwa_temperature_core::{FetchError, ForecastSource, StoreError, TemperatureStore};
use slog::{debug, info, warn, Logger};

use crate::{extract_records, ExtractError, SeriesMismatch};

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Schema(#[from] ExtractError),
    #[error("failed to write records: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
pub struct IngestSummary {
    pub extracted: usize,
    pub written: u64,
    pub mismatches: Vec<SeriesMismatch>,
}

/// One ingestion run: fetch the document, flatten it, append every record.
///
/// Nothing is written unless both the fetch and the extraction succeed.
pub async fn run_ingestion(
    source: &dyn ForecastSource,
    store: &TemperatureStore,
    logger: &Logger,
) -> Result<IngestSummary, IngestError> {
    info!(logger, "fetching forecast document");
    let document = source.fetch_document().await?;

    let extraction = extract_records(&document)?;
    debug!(logger, "records extracted: {}", extraction.records.len());
    for mismatch in &extraction.mismatches {
        warn!(
            logger,
            "MaxT/MinT series length differ, truncating to the shorter one";
            "area" => &mismatch.area,
            "max_len" => mismatch.max_len,
            "min_len" => mismatch.min_len
        );
    }

    let written = store.append_records(&extraction.records).await?;
    info!(logger, "Saved {} rows into temperature_daily", written);

    Ok(IngestSummary {
        extracted: extraction.records.len(),
        written,
        mismatches: extraction.mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use slog::{o, Discard};

    struct StaticSource(Result<Value, ()>);

    #[async_trait]
    impl ForecastSource for StaticSource {
        async fn fetch_document(&self) -> Result<Value, FetchError> {
            match &self.0 {
                Ok(value) => Ok(value.clone()),
                Err(()) => Err(FetchError::Decode(
                    serde_json::from_str::<Value>("<html>").unwrap_err(),
                )),
            }
        }
    }

    fn logger() -> Logger {
        Logger::root(Discard, o!())
    }

    fn sample_document() -> Value {
        json!({
            "cwaopendata": { "resources": { "resource": { "data": {
                "agrWeatherForecasts": { "weatherForecasts": { "location": [
                    {
                        "locationName": "Taipei",
                        "weatherElements": {
                            "MaxT": { "daily": [
                                { "dataDate": "2024-01-01", "temperature": "20" },
                                { "dataDate": "2024-01-02", "temperature": "22" }
                            ]},
                            "MinT": { "daily": [
                                { "dataDate": "2024-01-01", "temperature": "12" }
                            ]}
                        }
                    }
                ]}}
            }}}}
        })
    }

    #[tokio::test]
    async fn successful_run_appends_rows() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        let source = StaticSource(Ok(sample_document()));

        let summary = run_ingestion(&source, &store, &logger()).await.unwrap();

        assert_eq!(summary.extracted, 1);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.mismatches.len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_writes_nothing() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        let source = StaticSource(Err(()));

        let err = run_ingestion(&source, &store, &logger()).await.unwrap_err();

        assert!(matches!(err, IngestError::Fetch(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn schema_mismatch_writes_nothing() {
        let store = TemperatureStore::open_in_memory().await.unwrap();
        let source = StaticSource(Ok(json!({ "cwaopendata": {} })));

        let err = run_ingestion(&source, &store, &logger()).await.unwrap_err();

        assert!(matches!(err, IngestError::Schema(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
