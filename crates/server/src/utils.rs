use clap::Parser;
use cwa_temperature_core::{
    find_config_file, load_config, ConfigSource, FetchSettings, DEFAULT_CWA_URL, DEFAULT_DB_PATH,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_SERVER_PORT,
};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, time::Duration};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::DuplicatePolicy;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "CWA Temperature Server - JSON API and dashboard over stored daily temperatures"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CWA_SERVER_CONFIG, ./server.toml,
    /// $XDG_CONFIG_HOME/cwa-temperature/server.toml, /etc/cwa-temperature/server.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CWA_SERVER_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "CWA_SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CWA_SERVER_PORT")]
    pub port: Option<String>,

    /// SQLite database written by the ingest job
    #[arg(long, env = "CWA_DB_PATH")]
    pub db_path: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "CWA_SERVER_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Upstream dataset URL, used to resolve location coordinates
    #[arg(long, env = "CWA_URL")]
    pub cwa_url: Option<String>,

    /// CWA open data API key
    #[arg(long, env = "CWA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "CWA_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate validation for the upstream request
    #[arg(long, env = "CWA_INSECURE_TLS")]
    pub insecure_tls: Option<bool>,

    /// How repeated (area, date) rows from multiple ingest runs are treated
    #[arg(long, value_enum, env = "CWA_DUPLICATE_POLICY")]
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string())
    }

    pub fn db_path(&self) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy.unwrap_or_default()
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            url: self
                .cwa_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CWA_URL.to_string()),
            api_key: self.api_key.clone().unwrap_or_default(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT)),
            accept_invalid_certs: self.insecure_tls.unwrap_or(false),
        }
    }

    /// CLI args override file config (env vars are handled by clap)
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            host: self.host.or(file_config.host),
            port: self.port.or(file_config.port),
            db_path: self.db_path.or(file_config.db_path),
            ui_dir: self.ui_dir.or(file_config.ui_dir),
            cwa_url: self.cwa_url.or(file_config.cwa_url),
            api_key: self.api_key.or(file_config.api_key),
            timeout_secs: self.timeout_secs.or(file_config.timeout_secs),
            insecure_tls: self.insecure_tls.or(file_config.insecure_tls),
            duplicate_policy: self.duplicate_policy.or(file_config.duplicate_policy),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CWA_SERVER_CONFIG", "server.toml")
    };

    if let Some(path) = source.path() {
        log::info!("Loading config from: {}", path.display());
    }

    let file_config: Cli = load_config(&source).unwrap_or_default();
    cli_args.merge(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
