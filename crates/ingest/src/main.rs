use anyhow::anyhow;
use cwa_temperature_core::{CwaFetcher, TemperatureStore};
use ingest::{get_config_info, run_ingestion, run_on_interval, setup_logger};
use slog::{error, info, warn, Logger};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let (cli, source) = get_config_info();
    let logger = setup_logger(&cli);

    info!(logger, "CWA ingest starting...");
    info!(logger, "  Config: {}", source);
    info!(logger, "  Database: {}", cli.db_path());
    info!(logger, "  Upstream: {}", cli.cwa_url());
    if cli.api_key.is_none() {
        warn!(logger, "no API key configured, set CWA_API_KEY or api_key");
    }
    if cli.insecure_tls() {
        warn!(logger, "TLS certificate validation is disabled for upstream requests");
    }

    let fetcher = CwaFetcher::new(cli.fetch_settings())?;
    let store = TemperatureStore::open(&cli.db_path()).await?;
    store.ensure_schema().await?;

    let result = match cli.interval() {
        Some(every) => {
            run_every(&fetcher, &store, &logger, every).await;
            Ok(())
        }
        None => run_once(&fetcher, &store, &logger).await,
    };

    store.close().await;
    result
}

async fn run_once(
    fetcher: &CwaFetcher,
    store: &TemperatureStore,
    logger: &Logger,
) -> Result<(), anyhow::Error> {
    let summary = run_ingestion(fetcher, store, logger)
        .await
        .map_err(|e| anyhow!("ingestion failed: {}", e))?;
    info!(
        logger,
        "Finished ingestion: {} extracted, {} written", summary.extracted, summary.written
    );
    Ok(())
}

async fn run_every(fetcher: &CwaFetcher, store: &TemperatureStore, logger: &Logger, every: Duration) {
    info!(logger, "Wait time between runs: {} seconds", every.as_secs());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(logger, "failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_on_interval(every, shutdown, logger, move || async move {
        match run_once(fetcher, store, logger).await {
            Ok(_) => info!(logger, "waiting {} seconds for next run", every.as_secs()),
            Err(err) => error!(logger, "{}", err),
        }
    })
    .await;
}
