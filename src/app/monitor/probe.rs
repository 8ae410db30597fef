//! Health probe seam

use std::fmt;

use async_trait::async_trait;

use crate::app::client::{MovieClient, ProbeOutcome};

/// Anything that can measure API reachability
#[async_trait]
pub trait ConnectionProbe: Send + Sync + fmt::Debug {
    async fn run_probe(&self) -> ProbeOutcome;
}

#[async_trait]
impl ConnectionProbe for MovieClient {
    async fn run_probe(&self) -> ProbeOutcome {
        self.probe_with_latency().await
    }
}
