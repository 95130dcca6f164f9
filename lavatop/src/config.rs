//! Runtime configuration: optional TOML file, CLI overrides, validation.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::cli::Cli;
use crate::connection::DEFAULT_MAX_RETRIES;
use crate::scheduler::{is_allowed_interval, RefreshConfig, DEFAULT_INTERVAL_MS};

pub const DEFAULT_URL: &str = "http://localhost:2333";
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub endpoints: Endpoints,
    pub refresh: RefreshSection,
    pub connection: ConnectionConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub stats: String,
    pub info: String,
    pub version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            stats: "/v4/stats".into(),
            info: "/v4/info".into(),
            version: "/version".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefreshSection {
    pub interval_ms: u64,
    pub auto_refresh: bool,
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            auto_refresh: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Attempts allowed before the first successful poll.
    pub max_retries: u32,
    /// Fixed delay between those startup attempts.
    pub retry_delay_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// File (if any) overlaid with command-line flags, then validated.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.url {
            self.server.url = url.clone();
        }
        if let Some(ms) = cli.interval_ms {
            self.refresh.interval_ms = ms;
        }
        if cli.no_auto_refresh {
            self.refresh.auto_refresh = false;
        }
        if let Some(n) = cli.max_retries {
            self.connection.max_retries = n;
        }
        if let Some(ms) = cli.retry_delay_ms {
            self.connection.retry_delay_ms = ms;
        }
        if let Some(ms) = cli.timeout_ms {
            self.connection.request_timeout_ms = ms;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.server.url)
            .map_err(|e| anyhow::anyhow!("server.url {:?} is not a valid URL: {e}", self.server.url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "server.url must use http or https, got {}",
            url.scheme()
        );
        for (name, path) in [
            ("endpoints.stats", &self.endpoints.stats),
            ("endpoints.info", &self.endpoints.info),
            ("endpoints.version", &self.endpoints.version),
        ] {
            anyhow::ensure!(
                path.starts_with('/'),
                "{name} must start with '/', got {path:?}"
            );
        }
        anyhow::ensure!(
            is_allowed_interval(self.refresh.interval_ms),
            "refresh.interval_ms must be one of 1000, 2000, 5000, 10000, 30000, 60000, got {}",
            self.refresh.interval_ms
        );
        anyhow::ensure!(
            self.connection.max_retries > 0,
            "connection.max_retries must be > 0, got {}",
            self.connection.max_retries
        );
        anyhow::ensure!(
            self.connection.retry_delay_ms > 0,
            "connection.retry_delay_ms must be > 0, got {}",
            self.connection.retry_delay_ms
        );
        anyhow::ensure!(
            self.connection.request_timeout_ms > 0,
            "connection.request_timeout_ms must be > 0, got {}",
            self.connection.request_timeout_ms
        );
        Ok(())
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        Ok(Url::parse(&self.server.url)?)
    }

    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval_ms: self.refresh.interval_ms,
            auto_refresh: self.refresh.auto_refresh,
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.connection.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.connection.request_timeout_ms)
    }
}
