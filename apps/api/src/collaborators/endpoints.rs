//! Prioritized candidate requests: one logical call that tries several
//! endpoint/body combinations in order and stops at the first success.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::collaborators::ProviderError;

/// A single POST candidate.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub url: String,
    pub body: Value,
}

impl Attempt {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            body,
        }
    }
}

/// Ordered candidates sharing one per-attempt timeout. No backoff between attempts.
#[derive(Debug, Clone)]
pub struct CandidateRequests {
    pub attempts: Vec<Attempt>,
    pub timeout: Duration,
}

impl CandidateRequests {
    /// The same body posted to each URL in turn.
    pub fn same_body(urls: &[String], body: Value, timeout: Duration) -> Self {
        Self {
            attempts: urls
                .iter()
                .map(|url| Attempt::new(url.clone(), body.clone()))
                .collect(),
            timeout,
        }
    }

    /// Posts each candidate with bearer auth until one returns 2xx JSON that
    /// `extract` accepts. Every failure is logged and the next candidate tried.
    pub async fn first_success<F>(
        &self,
        client: &Client,
        api_key: &str,
        provider: &str,
        extract: F,
    ) -> Result<Value, ProviderError>
    where
        F: Fn(Value) -> Option<Value>,
    {
        for attempt in &self.attempts {
            let response = client
                .post(&attempt.url)
                .bearer_auth(api_key)
                .timeout(self.timeout)
                .json(&attempt.body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!("{provider} endpoint {} failed: {e}", attempt.url);
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!("{provider} API error {} from {}", status, attempt.url);
                continue;
            }

            let payload: Value = match response.json().await {
                Ok(v) => v,
                Err(e) => {
                    warn!("{provider} returned non-JSON body from {}: {e}", attempt.url);
                    continue;
                }
            };

            match extract(payload) {
                Some(value) => {
                    debug!("{provider} response received from {}", attempt.url);
                    return Ok(value);
                }
                None => {
                    warn!("{provider} response from {} had an unexpected shape", attempt.url);
                    continue;
                }
            }
        }

        Err(ProviderError::Exhausted {
            attempts: self.attempts.len(),
        })
    }
}
