use clap::Parser;
use cwa_temperature_core::{
    find_config_file, load_config, ConfigSource, FetchSettings, DEFAULT_CWA_URL, DEFAULT_DB_PATH,
    DEFAULT_FETCH_TIMEOUT,
};
use slog::{o, Drain, Level, Logger};
use std::{env, time::Duration};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "CWA Ingest - Fetches agricultural forecasts and stores daily temperatures"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CWA_INGEST_CONFIG, ./ingest.toml,
    /// $XDG_CONFIG_HOME/cwa-temperature/ingest.toml, /etc/cwa-temperature/ingest.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CWA_INGEST_LEVEL")]
    pub level: Option<String>,

    /// SQLite database file to append readings to
    #[arg(short, long, env = "CWA_DB_PATH")]
    pub db_path: Option<String>,

    /// Upstream dataset URL
    #[arg(short = 'u', long, env = "CWA_URL")]
    pub cwa_url: Option<String>,

    /// CWA open data API key (sent as the `Authorization` query parameter)
    #[arg(short = 'k', long, env = "CWA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(short, long, env = "CWA_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate validation for the upstream request
    #[arg(long, env = "CWA_INSECURE_TLS")]
    pub insecure_tls: Option<bool>,

    /// Repeat ingestion every N seconds; runs once and exits when unset
    #[arg(short, long, env = "CWA_INGEST_INTERVAL")]
    pub interval_secs: Option<u64>,
}

impl Cli {
    pub fn db_path(&self) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }

    pub fn cwa_url(&self) -> String {
        self.cwa_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CWA_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT))
    }

    pub fn insecure_tls(&self) -> bool {
        self.insecure_tls.unwrap_or(false)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            url: self.cwa_url(),
            api_key: self.api_key.clone().unwrap_or_default(),
            timeout: self.timeout(),
            accept_invalid_certs: self.insecure_tls(),
        }
    }

    /// CLI args override file config (env vars are handled by clap)
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            db_path: self.db_path.or(file_config.db_path),
            cwa_url: self.cwa_url.or(file_config.cwa_url),
            api_key: self.api_key.or(file_config.api_key),
            timeout_secs: self.timeout_secs.or(file_config.timeout_secs),
            insecure_tls: self.insecure_tls.or(file_config.insecure_tls),
            interval_secs: self.interval_secs.or(file_config.interval_secs),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> (Cli, ConfigSource) {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CWA_INGEST_CONFIG", "ingest.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_default();
    (cli_args.merge(file_config), source)
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = match cli.level.as_ref() {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_win_over_file_values() {
        let cli = Cli {
            db_path: Some("cli.db".to_string()),
            ..Cli::default()
        };
        let file = Cli {
            db_path: Some("file.db".to_string()),
            api_key: Some("CWA-FILE".to_string()),
            interval_secs: Some(3600),
            ..Cli::default()
        };

        let merged = cli.merge(file);
        assert_eq!(merged.db_path(), "cli.db");
        assert_eq!(merged.api_key.as_deref(), Some("CWA-FILE"));
        assert_eq!(merged.interval(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn defaults_run_once_with_certificate_checks() {
        let cli = Cli::default();
        assert_eq!(cli.db_path(), DEFAULT_DB_PATH);
        assert_eq!(cli.interval(), None);

        let settings = cli.fetch_settings();
        assert!(!settings.accept_invalid_certs);
        assert_eq!(settings.url, DEFAULT_CWA_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT));
    }

    #[test]
    fn zero_interval_means_run_once() {
        let cli = Cli {
            interval_secs: Some(0),
            ..Cli::default()
        };
        assert_eq!(cli.interval(), None);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("WARN"), Level::Warning);
        assert_eq!(parse_level("verbose"), Level::Info);
    }
}
