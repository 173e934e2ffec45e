//! Arcade: skill and certification matching through hosted tool execution.
//!
//! Two tools are tried in order against the same execute endpoint:
//! `Text.Analyze` first, then the more generic `Text.Process`. The useful
//! payload lives under `output.value` of the execution result.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::collaborators::endpoints::{Attempt, CandidateRequests};
use crate::collaborators::fallback::ArcadeDefaults;
use crate::collaborators::{preview, AnalysisProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.arcade.dev";

pub struct ArcadeAnalyzer {
    client: Client,
    api_key: Option<String>,
    user_id: String,
    base_url: String,
    timeout: Duration,
    defaults: ArcadeDefaults,
}

impl ArcadeAnalyzer {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        user_id: String,
        timeout: Duration,
        defaults: ArcadeDefaults,
    ) -> Self {
        Self {
            client,
            api_key,
            user_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
            defaults,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn candidates(&self, job_description: &str) -> CandidateRequests {
        let url = format!("{}/v1/tools/execute", self.base_url.trim_end_matches('/'));

        CandidateRequests {
            attempts: vec![
                Attempt::new(
                    url.clone(),
                    json!({
                        "tool_name": "Text.Analyze",
                        "input": {
                            "text": job_description,
                            "analysis_type": "skill_matching"
                        },
                        "user_id": self.user_id
                    }),
                ),
                Attempt::new(
                    url,
                    json!({
                        "tool_name": "Text.Process",
                        "input": {
                            "content": job_description,
                            "task": "extract skills and requirements for tradesman job"
                        },
                        "user_id": self.user_id
                    }),
                ),
            ],
            timeout: self.timeout,
        }
    }
}

/// Pulls `output.value` out of a tool execution result.
fn output_value(mut execution: Value) -> Option<Value> {
    execution
        .get_mut("output")
        .and_then(|output| output.get_mut("value"))
        .map(Value::take)
        .filter(|value| !value.is_null())
}

#[async_trait]
impl AnalysisProvider for ArcadeAnalyzer {
    fn name(&self) -> &'static str {
        "arcade"
    }

    async fn analyze(&self, job_description: &str) -> Result<Value, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        info!("Analyzing with Arcade API: {}", preview(job_description));

        let candidates = self.candidates(job_description);
        candidates
            .first_success(&self.client, api_key, self.name(), output_value)
            .await
    }

    fn synthetic(&self, job_description: &str) -> Value {
        self.defaults.render(job_description)
    }
}
