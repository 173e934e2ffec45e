//! External collaborators: the three analysis APIs and the web search API.
//!
//! Every collaborator fails soft: `AnalysisPanel` and `SearchStage` catch
//! any `ProviderError` and substitute the collaborator's synthetic data, so
//! nothing in this module ever turns into an HTTP error for the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::matching::trade_type::Category;
use crate::models::provider::ProviderListing;

pub mod arcade;
pub mod datalog;
pub mod endpoints;
pub mod fallback;
pub mod panel;
pub mod search;
pub mod web_search;
pub mod zeroentropy;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response shape from {0}")]
    Decode(String),

    #[error("all {attempts} candidate requests failed")]
    Exhausted { attempts: usize },
}

/// Request URLs can carry credentials in their query string, so they are
/// stripped before the error is stored or logged.
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e.without_url())
    }
}

/// Whether a payload came from the real collaborator or its synthetic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Synthetic,
}

/// A job-analysis API. `analyze` may fail; callers use `synthetic` in its place.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, job_description: &str) -> Result<Value, ProviderError>;

    /// Same-shaped placeholder payload for when `analyze` fails.
    fn synthetic(&self, job_description: &str) -> Value;
}

/// A web search for tradesmen of a category near a location.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(vec![])` means the search ran but found nothing.
    async fn search(
        &self,
        category: Category,
        location: &str,
    ) -> Result<Vec<ProviderListing>, ProviderError>;
}

/// Shared outbound HTTP client. The per-attempt timeout is applied per request.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// First 100 characters of a description, for log lines.
pub(crate) fn preview(text: &str) -> String {
    let cut: String = text.chars().take(100).collect();
    if cut.len() < text.len() {
        format!("{cut}...")
    } else {
        cut
    }
}
