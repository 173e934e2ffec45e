//! Datalog: market demand and pricing intelligence.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::collaborators::endpoints::CandidateRequests;
use crate::collaborators::fallback::DatalogDefaults;
use crate::collaborators::{preview, AnalysisProvider, ProviderError};

pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.datalog.com/v1/analyze",
    "https://api.datalog.com/analyze",
    "https://api.datalog.com/v1/market/insights",
];

pub struct DatalogAnalyzer {
    client: Client,
    api_key: Option<String>,
    endpoints: Vec<String>,
    timeout: Duration,
    defaults: DatalogDefaults,
}

impl DatalogAnalyzer {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        timeout: Duration,
        defaults: DatalogDefaults,
    ) -> Self {
        Self {
            client,
            api_key,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout,
            defaults,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }
}

#[async_trait]
impl AnalysisProvider for DatalogAnalyzer {
    fn name(&self) -> &'static str {
        "datalog"
    }

    async fn analyze(&self, job_description: &str) -> Result<Value, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        info!("Analyzing with Datalog API: {}", preview(job_description));

        let body = json!({
            "job_description": job_description,
            "analysis_type": "market_intelligence"
        });

        let candidates = CandidateRequests::same_body(&self.endpoints, body, self.timeout);
        candidates
            .first_success(&self.client, api_key, self.name(), Some)
            .await
    }

    fn synthetic(&self, job_description: &str) -> Value {
        self.defaults.render(job_description)
    }
}
