//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `labdash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use labdash_adapter_status_http::StatusHttpConfig;
use labdash_app::dashboard::Settings;
use labdash_domain::format::TimeAgoStyle;

const CONFIG_FILE: &str = "labdash.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where snapshots come from.
    pub upstream: UpstreamConfig,
    /// Poll and header timers.
    pub refresh: RefreshConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Kind of snapshot source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// GET the status document from `upstream.url`.
    #[default]
    Http,
    /// Read the status document from `upstream.file`.
    File,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "http" => Ok(Self::Http),
            "file" => Ok(Self::File),
            other => Err(ConfigError::Validation(format!(
                "unknown source `{other}`, expected `http` or `file`"
            ))),
        }
    }
}

/// Snapshot source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub source: SourceKind,
    /// Status endpoint, for the `http` source.
    pub url: String,
    /// Request timeout in seconds, for the `http` source.
    pub timeout_secs: u64,
    /// Snapshot path, for the `file` source.
    pub file: PathBuf,
}

/// Timer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between two fetches.
    pub poll_interval_secs: u64,
    /// Seconds between two header refreshes.
    pub header_interval_secs: u64,
    /// Show snapshot age in days past 24 hours instead of hours.
    pub day_granularity: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `labdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides looked up by variable name.
    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("LABDASH_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("LABDASH_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = var("LABDASH_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("LABDASH_SOURCE") {
            self.upstream.source = val.parse()?;
        }
        if let Some(val) = var("LABDASH_UPSTREAM_URL") {
            self.upstream.url = val;
        }
        if let Some(val) = var("LABDASH_SNAPSHOT_FILE") {
            self.upstream.file = PathBuf::from(val);
        }
        if let Some(val) = var("LABDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.refresh.poll_interval_secs == 0 || self.refresh.header_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh intervals must be non-zero".to_string(),
            ));
        }
        match self.upstream.source {
            SourceKind::Http if self.upstream.url.trim().is_empty() => Err(
                ConfigError::Validation("upstream.url must be set for the http source".to_string()),
            ),
            SourceKind::Http if self.upstream.timeout_secs == 0 => Err(ConfigError::Validation(
                "upstream.timeout_secs must be non-zero".to_string(),
            )),
            SourceKind::File if self.upstream.file.as_os_str().is_empty() => {
                Err(ConfigError::Validation(
                    "upstream.file must be set for the file source".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Timer settings for the dashboard service.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            poll_interval: Duration::from_secs(self.refresh.poll_interval_secs),
            header_interval: Duration::from_secs(self.refresh.header_interval_secs),
            time_ago_style: if self.refresh.day_granularity {
                TimeAgoStyle::Days
            } else {
                TimeAgoStyle::Hours
            },
        }
    }

    /// Settings for the HTTP snapshot source.
    #[must_use]
    pub fn status_http(&self) -> StatusHttpConfig {
        StatusHttpConfig {
            url: self.upstream.url.clone(),
            timeout_secs: self.upstream.timeout_secs,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        let http = StatusHttpConfig::default();
        Self {
            source: SourceKind::Http,
            url: http.url,
            timeout_secs: http.timeout_secs,
            file: PathBuf::from("snapshot.json"),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            poll_interval_secs: settings.poll_interval.as_secs(),
            header_interval_secs: settings.header_interval.as_secs(),
            day_granularity: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "labdashd=info,labdash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.source, SourceKind::Http);
        assert_eq!(
            config.upstream.url,
            "http://127.0.0.1:5678/webhook/homelab-status"
        );
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.refresh.poll_interval_secs, 60);
        assert_eq!(config.refresh.header_interval_secs, 10);
        assert!(!config.refresh.day_granularity);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [upstream]
            source = 'file'
            url = 'http://n8n.lan/webhook/status'
            timeout_secs = 5
            file = '/srv/labdash/status.json'

            [refresh]
            poll_interval_secs = 120
            header_interval_secs = 15
            day_granularity = true

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.upstream.source, SourceKind::File);
        assert_eq!(config.upstream.url, "http://n8n.lan/webhook/status");
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.upstream.file, PathBuf::from("/srv/labdash/status.json"));
        assert_eq!(config.refresh.poll_interval_secs, 120);
        assert_eq!(config.logging.filter, "debug");

        let settings = config.settings();
        assert_eq!(settings.poll_interval, Duration::from_secs(120));
        assert_eq!(settings.header_interval, Duration::from_secs(15));
        assert_eq!(settings.time_ago_style, TimeAgoStyle::Days);
    }

    #[test]
    fn should_reject_unknown_source_in_file() {
        let result = toml::from_str::<Config>("[upstream]\nsource = 'ftp'");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_override_file_values_from_env() {
        let mut config: Config = toml::from_str("[server]\nport = 9090").unwrap();
        config
            .apply_overrides(env(&[
                ("LABDASH_BIND", "127.0.0.1:8080"),
                ("LABDASH_SOURCE", "file"),
                ("LABDASH_SNAPSHOT_FILE", "/tmp/status.json"),
                ("LABDASH_UPSTREAM_URL", "http://status.lan/json"),
                ("LABDASH_LOG", "labdash=debug"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.upstream.source, SourceKind::File);
        assert_eq!(config.upstream.file, PathBuf::from("/tmp/status.json"));
        assert_eq!(config.status_http().url, "http://status.lan/json");
        assert_eq!(config.logging.filter, "labdash=debug");
    }

    #[test]
    fn should_prefer_rust_log_over_labdash_log() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("LABDASH_LOG", "info"), ("RUST_LOG", "trace")]))
            .unwrap();
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("LABDASH_PORT", "http")])).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_unknown_source_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("LABDASH_SOURCE", "ftp")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = Config::default();
        config.refresh.header_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_missing_url_for_http_source() {
        let mut config = Config::default();
        config.upstream.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_missing_url_for_file_source() {
        let mut config = Config::default();
        config.upstream.source = SourceKind::File;
        config.upstream.url = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
