//! Connection monitor timing configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::monitor;
use crate::errors::{ConfigError, ConfigResult};

/// Probe cadence and latency thresholds
///
/// Durations are written as humantime strings in configuration files,
/// e.g. `healthy_interval = "30s"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Interval between probes while the API is healthy
    #[serde(with = "humantime_serde")]
    pub healthy_interval: Duration,
    /// Interval between probes after a failure
    #[serde(with = "humantime_serde")]
    pub recovery_interval: Duration,
    /// Wait after the network comes back before probing
    #[serde(with = "humantime_serde")]
    pub online_settle_delay: Duration,
    /// Probes faster than this count as a good connection
    #[serde(with = "humantime_serde")]
    pub fast_threshold: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            healthy_interval: monitor::HEALTHY_INTERVAL,
            recovery_interval: monitor::RECOVERY_INTERVAL,
            online_settle_delay: monitor::ONLINE_SETTLE_DELAY,
            fast_threshold: monitor::FAST_THRESHOLD,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("monitor.healthy_interval", self.healthy_interval),
            ("monitor.recovery_interval", self.recovery_interval),
            ("monitor.fast_threshold", self.fast_threshold),
        ] {
            if value.is_zero() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: "0s".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}
