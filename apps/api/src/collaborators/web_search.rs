//! Google Custom Search: finds contractors on the open web.
//!
//! Search results carry no rating or phone number, so both are synthesized
//! per result. The rating is produced the way the API's neighbours send it,
//! as a one-decimal string, and normalized later with every other listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::collaborators::fallback::Variation;
use crate::collaborators::{ProviderError, SearchProvider};
use crate::matching::trade_type::Category;
use crate::models::provider::{ProviderListing, RawRating};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const RESULTS_PER_QUERY: &str = "5";

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

pub struct GoogleSearch {
    client: Client,
    api_key: Option<String>,
    cse_id: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl GoogleSearch {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        cse_id: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key,
            cse_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

pub fn build_query(category: Category, location: &str) -> String {
    format!("{category} contractor {location} licensed insured")
}

fn to_listing(
    index: usize,
    item: CseItem,
    query: &str,
    category: Category,
    location: &str,
) -> ProviderListing {
    let ordinal = index + 1;
    let mut v = Variation::seeded(&["google", query, ordinal.to_string().as_str()]);
    let rating = 4.0 + v.unit();
    let phone_suffix = v.range(1000, 10000);

    ProviderListing {
        name: item
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Contractor {ordinal}")),
        specialty: category,
        rating: RawRating::Text(format!("{rating:.1}")),
        location: location.to_string(),
        description: item
            .snippet
            .unwrap_or_else(|| format!("Found through Google search - {category} contractor")),
        contact: format!("+1-555-{phone_suffix}"),
        website: item
            .link
            .unwrap_or_else(|| format!("https://contractor{ordinal}.com")),
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn search(
        &self,
        category: Category,
        location: &str,
    ) -> Result<Vec<ProviderListing>, ProviderError> {
        let (api_key, cse_id) = match (self.api_key.as_deref(), self.cse_id.as_deref()) {
            (Some(key), Some(cx)) => (key, cx),
            _ => return Err(ProviderError::MissingCredential),
        };

        let query = build_query(category, location);
        info!("Searching with Google Custom Search API: {query}");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("cx", cse_id),
                ("q", query.as_str()),
                ("num", RESULTS_PER_QUERY),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let body: CseResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::Decode(self.base_url.clone()))?;

        Ok(body
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| to_listing(i, item, &query, category, location))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::test_support::spawn_server;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn search(base: &str) -> GoogleSearch {
        GoogleSearch::new(
            Client::new(),
            Some("g-key".to_string()),
            Some("cse-1".to_string()),
            Duration::from_secs(2),
        )
        .with_base_url(base)
    }

    #[test]
    fn test_query_format() {
        assert_eq!(
            build_query(Category::Plumbing, "Oakland, CA"),
            "plumbing contractor Oakland, CA licensed insured"
        );
    }

    #[tokio::test]
    async fn test_missing_cse_id_is_missing_credential() {
        let search = GoogleSearch::new(
            Client::new(),
            Some("g-key".to_string()),
            None,
            Duration::from_secs(1),
        );
        let err = search.search(Category::General, "Boise, ID").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential));
    }

    #[tokio::test]
    async fn test_maps_items_with_fallback_fields() {
        let router = Router::new().route(
            "/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "items": [
                        {
                            "title": params.get("q").cloned().unwrap_or_default(),
                            "snippet": "Licensed plumbers",
                            "link": "https://pipes.example"
                        },
                        {}
                    ]
                }))
            }),
        );
        let base = spawn_server(router).await;

        let listings = search(&base).search(Category::Plumbing, "Oakland, CA").await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "plumbing contractor Oakland, CA licensed insured");
        assert_eq!(listings[0].website, "https://pipes.example");
        assert_eq!(listings[1].name, "Contractor 2");
        assert_eq!(listings[1].website, "https://contractor2.com");
        assert_eq!(
            listings[1].description,
            "Found through Google search - plumbing contractor"
        );
        for listing in &listings {
            assert_eq!(listing.specialty, Category::Plumbing);
            assert_eq!(listing.location, "Oakland, CA");
            assert!(listing.contact.starts_with("+1-555-"));
            let rating = listing.rating.normalize();
            assert!((4.0..=5.0).contains(&rating), "rating {rating} out of range");
            assert!(matches!(listing.rating, RawRating::Text(_)));
        }
    }

    #[tokio::test]
    async fn test_sends_key_cx_and_result_count() {
        let router = Router::new().route(
            "/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let ok = params.get("key").map(String::as_str) == Some("g-key")
                    && params.get("cx").map(String::as_str) == Some("cse-1")
                    && params.get("num").map(String::as_str) == Some("5");
                if ok {
                    (StatusCode::OK, Json(json!({ "items": [{ "title": "Verified" }] })))
                } else {
                    (StatusCode::FORBIDDEN, Json(Value::Null))
                }
            }),
        );
        let base = spawn_server(router).await;

        let listings = search(&base).search(Category::Electrical, "Reno, NV").await.unwrap();
        assert_eq!(listings[0].name, "Verified");
    }

    #[tokio::test]
    async fn test_no_items_is_empty_not_error() {
        let router = Router::new().route("/", get(|| async { Json(json!({ "kind": "search" })) }));
        let base = spawn_server(router).await;

        let listings = search(&base).search(Category::Carpentry, "Reno, NV").await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        let router = Router::new().route(
            "/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "items": [] }))
            }),
        );
        let base = spawn_server(router).await;
        let search = GoogleSearch::new(
            Client::new(),
            Some("SECRET-KEY-123".to_string()),
            Some("cse-1".to_string()),
            Duration::from_millis(200),
        )
        .with_base_url(base);

        let err = search.search(Category::Plumbing, "Oakland, CA").await.unwrap_err();

        assert!(matches!(err, ProviderError::Http(_)));
        let logged = err.to_string();
        assert!(!logged.contains("SECRET-KEY-123"), "key in error text: {logged}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn test_quota_error_is_status_error() {
        let router = Router::new().route("/", get(|| async { StatusCode::TOO_MANY_REQUESTS }));
        let base = spawn_server(router).await;

        let err = search(&base).search(Category::Carpentry, "Reno, NV").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 429, .. }));
    }
}
