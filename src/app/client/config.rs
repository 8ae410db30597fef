//! HTTP client configuration and building logic
//!
//! This module handles the configuration of the movie database client:
//! host list, API key, timeouts, retry budget and the underlying reqwest
//! client settings.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{api, http, limits};
use crate::errors::{ConfigError, ConfigResult};

use super::retry::RetryPolicy;

/// Configuration for the movie database client
///
/// Doubles as the `[client]` section of the configuration file, where
/// durations are humantime strings such as `"10s"` or `"250ms"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Candidate base URLs in fallback order
    pub hosts: Vec<String>,
    /// Per-attempt timeout for regular requests
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Per-attempt timeout for connectivity probes
    #[serde(with = "humantime_serde")]
    pub probe_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Retries per host after the first attempt
    pub max_retries: u32,
    /// Base delay for exponential backoff
    #[serde(with = "humantime_serde")]
    pub retry_base_delay: Duration,
    /// Upper bound of the random jitter added to each backoff
    #[serde(with = "humantime_serde")]
    pub retry_max_jitter: Duration,
    /// Client-side rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Connection pool idle timeout
    #[serde(with = "humantime_serde")]
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
    /// User agent sent with every request
    pub user_agent: String,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut hosts = vec![api::PRIMARY_HOST.to_string()];
        hosts.extend(api::FALLBACK_HOSTS.iter().map(|host| host.to_string()));

        Self {
            api_key: api::DEFAULT_API_KEY.to_string(),
            hosts,
            request_timeout: http::DEFAULT_TIMEOUT,
            probe_timeout: http::PROBE_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            max_retries: limits::MAX_RETRIES,
            retry_base_delay: Duration::from_millis(limits::RETRY_BASE_DELAY_MS),
            retry_max_jitter: Duration::from_millis(limits::RETRY_MAX_JITTER_MS),
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            user_agent: http::USER_AGENT.to_string(),
            tcp_nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Retry policy derived from the backoff settings
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            self.retry_base_delay,
            self.retry_max_jitter,
        )
    }

    /// Parse the configured hosts into base URLs
    pub fn base_urls(&self) -> ConfigResult<Vec<Url>> {
        self.hosts
            .iter()
            .map(|host| {
                Url::parse(host).map_err(|e| ConfigError::InvalidValue {
                    field: "client.hosts".to_string(),
                    value: host.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.hosts.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "client.hosts".to_string(),
                value: "[]".to_string(),
                reason: "At least one host is required".to_string(),
            });
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "client.api_key".to_string(),
                value: String::new(),
                reason: "API key cannot be empty".to_string(),
            });
        }

        if self.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "Rate limit must be non-zero".to_string(),
            });
        }

        if self.request_timeout.is_zero() || self.probe_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "client.request_timeout".to_string(),
                value: format!("{:?}/{:?}", self.request_timeout, self.probe_timeout),
                reason: "Timeouts must be greater than zero".to_string(),
            });
        }

        self.base_urls().map(|_| ())
    }

    /// Builds the HTTP client with the specified configuration
    ///
    /// No overall request timeout is set here; each attempt is bounded by
    /// the resilient transport instead.
    pub fn build_http_client(&self) -> ConfigResult<Client> {
        let mut client_builder = Client::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.pool_max_per_host);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "client".to_string(),
                value: "http client".to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.hosts.len(), 3);
        assert_eq!(config.hosts[0], api::PRIMARY_HOST);
        assert!(config.hosts[2].starts_with("http://"));
        assert_eq!(config.max_retries, limits::MAX_RETRIES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ClientConfig {
            hosts: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            rate_limit_rps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            hosts: vec!["not a url".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = ClientConfig {
            max_retries: 4,
            retry_base_delay: Duration::from_millis(50),
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.attempts_per_host(), 5);
        assert_eq!(policy.base_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_client_section_from_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            hosts = ["https://mirror.example/"]
            request_timeout = "3s"
            retry_base_delay = "200ms"
            "#,
        )
        .unwrap();

        assert_eq!(config.hosts, vec!["https://mirror.example/".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.retry_base_delay, Duration::from_millis(200));
        assert_eq!(config.api_key, api::DEFAULT_API_KEY);
        assert_eq!(config.user_agent, http::USER_AGENT);
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig::default();
        assert!(config.build_http_client().is_ok());
    }
}
