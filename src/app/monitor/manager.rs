//! Connection monitor driving health probes
//!
//! The monitor owns a [`ConnectionState`] published on a watch channel.
//! Network-level online/offline changes come in through
//! [`set_online`](ConnectionMonitor::set_online); API reachability comes from
//! probes, run on demand or by the background task started with
//! [`spawn`](ConnectionMonitor::spawn).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::MonitorConfig;
use super::probe::ConnectionProbe;
use super::state::{ConnectionQuality, ConnectionState, ConnectionStatus};

/// Clears the in-flight flag even if the probing future is dropped
struct CheckGuard<'a>(&'a AtomicBool);

impl Drop for CheckGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Tracks network and API reachability over time
#[derive(Debug)]
pub struct ConnectionMonitor {
    probe: Arc<dyn ConnectionProbe>,
    config: MonitorConfig,
    state_tx: watch::Sender<ConnectionState>,
    checking: AtomicBool,
}

impl ConnectionMonitor {
    pub fn new(probe: Arc<dyn ConnectionProbe>, config: MonitorConfig) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::default());
        Self {
            probe,
            config,
            state_tx,
            checking: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ConnectionState {
        self.state_tx.borrow().clone()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state_tx.borrow().status()
    }

    pub fn status_message(&self) -> &'static str {
        self.status().message()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    pub fn is_checking(&self) -> bool {
        self.checking.load(Ordering::SeqCst)
    }

    /// Feed in a network-level online/offline change
    ///
    /// Going offline forces the Offline state without probing. Coming back
    /// online resets the failure counter, waits for the network to settle
    /// and then probes once.
    pub async fn set_online(&self, online: bool) {
        let was_online = self.state_tx.borrow().is_online;

        if !online {
            self.state_tx.send_modify(|state| {
                state.mark_offline();
                state.is_checking = false;
            });
            if was_online {
                info!("Network went offline");
            }
            return;
        }

        self.state_tx.send_modify(|state| {
            state.is_online = true;
            if !was_online {
                state.consecutive_failures = 0;
            }
        });

        if !was_online {
            info!(
                "Network back online, probing in {:?}",
                self.config.online_settle_delay
            );
            tokio::time::sleep(self.config.online_settle_delay).await;
            self.check_connection().await;
        }
    }

    /// Probe the API once and update the state
    ///
    /// A call made while another probe is running returns the current status
    /// without probing. While offline no request is made at all.
    pub async fn check_connection(&self) -> ConnectionStatus {
        if self
            .checking
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Connection check already in progress, skipping");
            return self.status();
        }
        let _guard = CheckGuard(&self.checking);

        let online = self.state_tx.borrow().is_online;
        if !online {
            self.state_tx.send_modify(ConnectionState::mark_offline);
            return ConnectionStatus::Offline;
        }

        let previous = self.status();
        self.state_tx.send_modify(|state| state.is_checking = true);

        let outcome = self.probe.run_probe().await;

        self.state_tx.send_modify(|state| {
            state.is_checking = false;
            if !state.is_online {
                // went offline while the probe was running
                return;
            }
            state.last_checked = Some(Utc::now());
            state.last_latency = Some(outcome.latency);

            if outcome.reachable {
                state.api_reachable = true;
                state.consecutive_failures = 0;
                state.quality = if outcome.latency < self.config.fast_threshold {
                    ConnectionQuality::Good
                } else {
                    ConnectionQuality::Poor
                };
            } else {
                state.api_reachable = false;
                state.quality = ConnectionQuality::Poor;
                state.consecutive_failures += 1;
            }
        });

        let current = self.status();
        if current != previous {
            info!("Connection status changed: {} -> {}", previous, current);
        }
        if current == ConnectionStatus::Unreachable {
            let failures = self.state_tx.borrow().consecutive_failures;
            warn!("API probe failed ({} consecutive)", failures);
        }
        current
    }

    /// Delay before the next periodic probe
    pub fn next_probe_interval(&self) -> Duration {
        if self.state_tx.borrow().consecutive_failures > 0 {
            self.config.recovery_interval
        } else {
            self.config.healthy_interval
        }
    }

    /// Start periodic probing until shutdown is broadcast
    ///
    /// Probes once immediately, then on the adaptive cadence. Ticks that
    /// find the network offline are skipped.
    pub fn spawn(self: Arc<Self>, mut shutdown_rx: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.check_connection().await;

            loop {
                tokio::select! {
                    _ = tokio::time::sleep(self.next_probe_interval()) => {
                        let online = self.state_tx.borrow().is_online;
                        if online {
                            self.check_connection().await;
                        } else {
                            debug!("Offline, skipping periodic probe");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Connection monitor received shutdown signal");
                        break;
                    }
                }
            }
        })
    }
}
