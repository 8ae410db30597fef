//! Scripted request sender for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::errors::{TransportError, TransportResult};

use super::config::ClientConfig;
use super::http::{RawResponse, RequestSender};

/// One scripted reaction of the fake server
#[derive(Debug, Clone)]
pub enum Step {
    Respond(RawResponse),
    Fail(TransportError),
    /// Never answers; exercises timeouts and cancellation
    Hang,
}

impl Step {
    pub fn ok(body: &str) -> Self {
        Step::Respond(RawResponse::new(200, body))
    }

    pub fn status(status: u16) -> Self {
        Step::Respond(RawResponse::new(status, ""))
    }

    pub fn unreachable() -> Self {
        Step::Fail(TransportError::NetworkUnreachable {
            reason: "connection refused".to_string(),
        })
    }
}

/// Plays back steps in order; the last step repeats once the script runs out
#[derive(Debug)]
pub struct ScriptedSender {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedSender {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_hosts(&self) -> Vec<String> {
        self.requested_urls()
            .iter()
            .map(|url| url.host_str().unwrap_or_default().to_string())
            .collect()
    }

    fn next_step(&self) -> Option<Step> {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front()
        } else {
            steps.front().cloned()
        }
    }
}

#[async_trait]
impl RequestSender for ScriptedSender {
    async fn send(&self, url: &Url) -> TransportResult<RawResponse> {
        self.requests.lock().unwrap().push(url.clone());

        match self.next_step() {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::NetworkUnreachable {
                    reason: "hung request resumed".to_string(),
                })
            }
            None => Err(TransportError::NetworkUnreachable {
                reason: "empty script".to_string(),
            }),
        }
    }
}

/// Client configuration with three test hosts and fast backoff
pub fn test_config() -> ClientConfig {
    ClientConfig {
        api_key: "test-key".to_string(),
        hosts: vec![
            "https://primary.test/".to_string(),
            "https://mirror.test/".to_string(),
            "http://plain.test/".to_string(),
        ],
        request_timeout: Duration::from_secs(1),
        probe_timeout: Duration::from_millis(500),
        max_retries: 2,
        retry_base_delay: Duration::from_millis(10),
        retry_max_jitter: Duration::ZERO,
        rate_limit_rps: 10_000,
        ..Default::default()
    }
}
