//! Zeroentropy: job complexity, cost and urgency estimation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::collaborators::endpoints::CandidateRequests;
use crate::collaborators::fallback::ZeroentropyDefaults;
use crate::collaborators::{preview, AnalysisProvider, ProviderError};

/// Published endpoint locations, most likely first.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.zeroentropy.dev/v1/status/get-status",
    "https://api.zeroentropy.dev/v1/analyze",
    "https://api.zeroentropy.dev/analyze",
    "https://api.zeroentropy.dev/v1/jobs/analyze",
    "https://zeroentropy.dev/api/v1/analyze",
    "https://zeroentropy.dev/api/analyze",
];

pub struct ZeroentropyAnalyzer {
    client: Client,
    api_key: Option<String>,
    endpoints: Vec<String>,
    timeout: Duration,
    defaults: ZeroentropyDefaults,
}

impl ZeroentropyAnalyzer {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        timeout: Duration,
        defaults: ZeroentropyDefaults,
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
impl AnalysisProvider for ZeroentropyAnalyzer {
    fn name(&self) -> &'static str {
        "zeroentropy"
    }

    async fn analyze(&self, job_description: &str) -> Result<Value, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        info!("Analyzing with Zeroentropy API: {}", preview(job_description));

        let body = json!({
            "job_description": job_description,
            "analysis_type": "complexity_and_cost"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::test_support::spawn_server;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };

    fn analyzer(api_key: Option<&str>) -> ZeroentropyAnalyzer {
        ZeroentropyAnalyzer::new(
            Client::new(),
            api_key.map(String::from),
            Duration::from_secs(2),
            ZeroentropyDefaults::default(),
        )
    }

    #[tokio::test]
    async fn test_missing_key_is_missing_credential() {
        let err = analyzer(None).analyze("fix pipe").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential));
    }

    #[tokio::test]
    async fn test_posts_job_with_bearer_and_falls_through_to_working_endpoint() {
        let router = Router::new()
            .route("/v1/analyze", post(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/analyze",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({
                        "complexity": "low",
                        "auth": auth,
                        "analysis_type": body["analysis_type"],
                        "job": body["job_description"]
                    }))
                }),
            );
        let base = spawn_server(router).await;

        let value = analyzer(Some("ze-key"))
            .with_endpoints(vec![format!("{base}/v1/analyze"), format!("{base}/analyze")])
            .analyze("fix pipe")
            .await
            .unwrap();

        assert_eq!(value["complexity"], "low");
        assert_eq!(value["auth"], "Bearer ze-key");
        assert_eq!(value["analysis_type"], "complexity_and_cost");
        assert_eq!(value["job"], "fix pipe");
    }

    #[test]
    fn test_synthetic_uses_injected_table() {
        let table = ZeroentropyDefaults {
            cost_range: (42, 43),
            high_complexity_share: 1.0,
            urgent_share: 0.0,
        };
        let analyzer = ZeroentropyAnalyzer::new(Client::new(), None, Duration::from_secs(1), table);

        let value = analyzer.synthetic("wire a new outlet");
        assert_eq!(value["estimatedCost"], 42);
        assert_eq!(value["complexity"], "high");
        assert_eq!(value["urgency"], "normal");
        assert_eq!(value["tradeType"], "electrical");
    }
}
