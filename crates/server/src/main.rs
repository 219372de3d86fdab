use anyhow::anyhow;
use axum::serve;
use futures::TryFutureExt;
use log::{error, info, warn};
use server::{app, build_app_state, get_config_info, get_log_level, setup_logger};
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info();
    let log_level = get_log_level(&cli);

    setup_logger()
        .level(log_level)
        .level_for("server", log_level)
        .level_for("cwa_temperature_core", log_level)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .apply()?;

    let db_path = cli.db_path();
    let static_dir = cli.static_dir();
    let duplicates = cli.duplicate_policy();
    let fetch_settings = cli.fetch_settings();
    let host = cli.host();
    let port = cli.port();

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let listener = TcpListener::bind(socket_addr)
        .map_err(|e| anyhow!("error binding to socket: {}", e))
        .await?;

    info!("CWA temperature server starting...");
    info!("  Listen: http://{}", socket_addr);
    info!("  Docs:   http://{}/docs", socket_addr);
    info!("  Database: {}", db_path);
    info!("  Static: {}", static_dir);
    info!("  Duplicates: {:?}", duplicates);
    if fetch_settings.api_key.is_empty() {
        warn!("no API key configured, coordinates will be unavailable");
    }
    if fetch_settings.accept_invalid_certs {
        warn!("TLS certificate validation is disabled for upstream requests");
    }

    let app_state = build_app_state(static_dir, db_path, fetch_settings, duplicates)
        .map_err(|e| {
            error!("error building app: {}", e);
            e
        })?;

    let app = app(app_state);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
}
