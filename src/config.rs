//! Configuration management for Movie Finder
//!
//! This module loads the TOML configuration file, fills in defaults for
//! anything left out and resolves the API key from the command line, the
//! environment and the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, MonitorConfig};
use crate::constants::{api, env, filter, http, limits, logging, monitor};
use crate::errors::{ConfigError, ConfigResult};

/// Project-local configuration file name
pub const LOCAL_CONFIG_FILE: &str = "movie-finder.toml";

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Smart filter settings
    pub filter: FilterConfig,
    /// Connection monitor settings
    pub monitor: MonitorConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Smart filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Detail lookups run concurrently per batch
    pub batch_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            batch_size: filter::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file or the standard locations
    ///
    /// Falls back to defaults when no file exists. An explicitly given file
    /// that does not exist is an error.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> ConfigResult<()> {
        self.client.validate()?;
        self.monitor.validate()?;

        if self.filter.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "filter.batch_size".to_string(),
                value: "0".to_string(),
                reason: "Batch size must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Client configuration with the API key resolved
    ///
    /// Precedence: command line, `OMDB_API_KEY`, configuration file, then
    /// the public demo key.
    pub fn client_config(&self, api_key_override: Option<&str>) -> ClientConfig {
        let env_key = std::env::var(env::API_KEY).ok();
        ClientConfig {
            api_key: pick_api_key(api_key_override, env_key.as_deref(), &self.client.api_key),
            ..self.client.clone()
        }
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write a commented default configuration file
    ///
    /// Without `force`, an existing file is left untouched and `false` is
    /// returned.
    pub async fn write_default(path: &Path, force: bool) -> ConfigResult<bool> {
        if path.exists() && !force {
            debug!("Config file already exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to {}", path.display());
        Ok(true)
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Per-user config file path, if the platform has a config directory
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("movie-finder").join("config.toml"))
    }

    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Movie Finder Configuration
# Durations accept humantime strings such as "500ms", "10s" or "1m".

[client]
# API key; OMDB_API_KEY and --api-key take precedence
# api_key = "your-key"

# Hosts tried in order; the last is a plain-HTTP fallback
hosts = ["{primary}", "{fallback_a}", "{fallback_b}"]

request_timeout = "{request_timeout}s"
probe_timeout = "{probe_timeout}s"
connect_timeout = "{connect_timeout}s"

# Retries per host after the first attempt
max_retries = {max_retries}
retry_base_delay = "{retry_base}ms"
retry_max_jitter = "{retry_jitter}ms"

rate_limit_rps = {rate_limit}
pool_max_per_host = {pool_max}
user_agent = "{user_agent}"
tcp_nodelay = true

[filter]
# Detail lookups run together per batch
batch_size = {batch_size}

[monitor]
healthy_interval = "{healthy}s"
recovery_interval = "{recovery}s"
online_settle_delay = "{settle}s"
# Probes faster than this count as a good connection
fast_threshold = "{fast}s"

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            primary = api::PRIMARY_HOST,
            fallback_a = api::FALLBACK_HOSTS[0],
            fallback_b = api::FALLBACK_HOSTS[1],
            request_timeout = http::DEFAULT_TIMEOUT.as_secs(),
            probe_timeout = http::PROBE_TIMEOUT.as_secs(),
            connect_timeout = http::CONNECT_TIMEOUT.as_secs(),
            max_retries = limits::MAX_RETRIES,
            retry_base = limits::RETRY_BASE_DELAY_MS,
            retry_jitter = limits::RETRY_MAX_JITTER_MS,
            rate_limit = limits::DEFAULT_RATE_LIMIT_RPS,
            pool_max = http::POOL_MAX_PER_HOST,
            user_agent = http::USER_AGENT,
            batch_size = filter::DEFAULT_BATCH_SIZE,
            healthy = monitor::HEALTHY_INTERVAL.as_secs(),
            recovery = monitor::RECOVERY_INTERVAL.as_secs(),
            settle = monitor::ONLINE_SETTLE_DELAY.as_secs(),
            fast = monitor::FAST_THRESHOLD.as_secs(),
            level = logging::DEFAULT_LOG_LEVEL,
        )
    }
}

fn pick_api_key(cli: Option<&str>, env: Option<&str>, file: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .unwrap_or(file)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_creation() {
        let config = AppConfig::default();

        assert_eq!(config.client.rate_limit_rps, limits::DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(config.client.api_key, api::DEFAULT_API_KEY);
        assert_eq!(config.filter.batch_size, 5);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_generation() {
        let content = AppConfig::generate_default_config_content();

        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed, AppConfig::default());
        assert!(content.contains("# Movie Finder Configuration"));
        assert!(content.contains("[monitor]"));
    }

    #[test]
    fn test_api_key_precedence() {
        assert_eq!(pick_api_key(Some("cli"), Some("env"), "file"), "cli");
        assert_eq!(pick_api_key(None, Some("env"), "file"), "env");
        assert_eq!(pick_api_key(Some("  "), None, "file"), "file");
        assert_eq!(pick_api_key(None, None, "file"), "file");
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("movie-finder.toml");

        let test_config = r#"
[client]
api_key = "abc123"
max_retries = 4
request_timeout = "3s"

[filter]
batch_size = 8

[monitor]
healthy_interval = "2m"

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();

        assert_eq!(config.client.api_key, "abc123");
        assert_eq!(config.client.max_retries, 4);
        assert_eq!(config.client.request_timeout, Duration::from_secs(3));
        assert_eq!(config.client.hosts.len(), 3);
        assert_eq!(config.filter.batch_size, 8);
        assert_eq!(config.monitor.healthy_interval, Duration::from_secs(120));
        assert_eq!(config.monitor.fast_threshold, monitor::FAST_THRESHOLD);
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        tokio::fs::write(&config_path, "[filter]\nbatch_size = 0\n")
            .await
            .unwrap();

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn test_write_default_respects_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        assert!(AppConfig::write_default(&config_path, false).await.unwrap());
        assert!(!AppConfig::write_default(&config_path, false).await.unwrap());
        assert!(AppConfig::write_default(&config_path, true).await.unwrap());

        let loaded = AppConfig::load(Some(config_path)).await.unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[client]"));
        assert_eq!(toml::from_str::<AppConfig>(&rendered).unwrap(), config);
    }
}
