//! Scripted probe for monitor tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::app::client::ProbeOutcome;

use super::probe::ConnectionProbe;

/// Returns scripted outcomes in order, repeating the last one
#[derive(Debug)]
pub struct ScriptedProbe {
    outcomes: Vec<ProbeOutcome>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self {
            outcomes,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reachable(latency: Duration) -> Self {
        Self::new(vec![Self::success(latency)])
    }

    pub fn unreachable() -> Self {
        Self::new(vec![Self::failure()])
    }

    pub fn success(latency: Duration) -> ProbeOutcome {
        ProbeOutcome {
            reachable: true,
            latency,
        }
    }

    pub fn failure() -> ProbeOutcome {
        ProbeOutcome {
            reachable: false,
            latency: Duration::from_millis(5),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionProbe for ScriptedProbe {
    async fn run_probe(&self) -> ProbeOutcome {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcomes
            .get(index)
            .or_else(|| self.outcomes.last())
            .copied()
            .unwrap_or_else(Self::failure)
    }
}
