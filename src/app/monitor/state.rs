//! Connection state snapshots

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Latency class of the most recent probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionQuality {
    Good,
    Poor,
    Offline,
}

/// Overall status shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Online, API reachable, fast probe
    Good,
    /// Online, API reachable, slow probe
    Poor,
    /// Online but the API did not answer
    Unreachable,
    /// No network at all
    Offline,
}

impl ConnectionStatus {
    /// Whether searches are worth attempting
    pub fn can_search(&self) -> bool {
        matches!(self, Self::Good | Self::Poor)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Offline => "You are offline. Check your internet connection.",
            Self::Unreachable => "The movie database is not responding. Retrying automatically.",
            Self::Poor => "Connection is slow. Searches may take longer than usual.",
            Self::Good => "Connected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Good => "online (good)",
            Self::Poor => "online (poor)",
            Self::Unreachable => "online (API unreachable)",
            Self::Offline => "offline",
        };
        f.write_str(label)
    }
}

/// Network and API reachability as last observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionState {
    /// Network-level flag fed in from outside
    pub is_online: bool,
    /// Whether the last probe got an API answer
    pub api_reachable: bool,
    /// Poor while the API is unreachable, Offline while the network is down
    pub quality: ConnectionQuality,
    pub last_checked: Option<DateTime<Utc>>,
    pub last_latency: Option<Duration>,
    pub consecutive_failures: u32,
    pub is_checking: bool,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            is_online: true,
            api_reachable: true,
            quality: ConnectionQuality::Good,
            last_checked: None,
            last_latency: None,
            consecutive_failures: 0,
            is_checking: false,
        }
    }
}

impl ConnectionState {
    pub fn status(&self) -> ConnectionStatus {
        if !self.is_online {
            ConnectionStatus::Offline
        } else if !self.api_reachable {
            ConnectionStatus::Unreachable
        } else if self.quality == ConnectionQuality::Poor {
            ConnectionStatus::Poor
        } else {
            ConnectionStatus::Good
        }
    }

    pub fn status_message(&self) -> &'static str {
        self.status().message()
    }

    pub(crate) fn mark_offline(&mut self) {
        self.is_online = false;
        self.api_reachable = false;
        self.quality = ConnectionQuality::Offline;
        self.last_checked = Some(Utc::now());
    }
}
