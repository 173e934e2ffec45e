//! Search stage: one web search per request, synthetic listings on failure,
//! and rating normalization before anything reaches the ranker.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn, Instrument, Span};

use crate::collaborators::fallback::SearchDefaults;
use crate::collaborators::{DataSource, ProviderError, SearchProvider};
use crate::matching::trade_type::Category;
use crate::models::provider::{ProviderListing, ServiceProvider};

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub providers: Vec<ServiceProvider>,
    pub source: DataSource,
}

#[derive(Clone)]
pub struct SearchStage {
    provider: Arc<dyn SearchProvider>,
    defaults: Arc<SearchDefaults>,
}

impl SearchStage {
    pub fn new(provider: Arc<dyn SearchProvider>, defaults: SearchDefaults) -> Self {
        Self {
            provider,
            defaults: Arc::new(defaults),
        }
    }

    pub async fn run(&self, category: Category, location: &str) -> Result<SearchOutcome> {
        let stage = self.clone();
        let location = location.to_string();

        tokio::spawn(
            async move { stage.search_or_synthetic(category, &location).await }
                .instrument(Span::current()),
        )
        .await
        .context("search task did not complete")
    }

    async fn search_or_synthetic(&self, category: Category, location: &str) -> SearchOutcome {
        let name = self.provider.name();

        let (listings, source) = match self.provider.search(category, location).await {
            Ok(listings) if !listings.is_empty() => (listings, DataSource::Live),
            Ok(_) => {
                info!("No {name} search results found, using synthetic listings");
                (self.defaults.render(category, location), DataSource::Synthetic)
            }
            Err(ProviderError::MissingCredential) => {
                info!("Using synthetic {name} search (API keys not provided)");
                (self.defaults.render(category, location), DataSource::Synthetic)
            }
            Err(e) => {
                warn!("{name} search failed, using synthetic listings: {e}");
                (self.defaults.render(category, location), DataSource::Synthetic)
            }
        };

        SearchOutcome {
            providers: listings.into_iter().map(ProviderListing::normalize).collect(),
            source,
        }
    }
}
