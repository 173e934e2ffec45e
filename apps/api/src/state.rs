use std::sync::Arc;

use crate::collaborators::arcade::ArcadeAnalyzer;
use crate::collaborators::build_http_client;
use crate::collaborators::datalog::DatalogAnalyzer;
use crate::collaborators::fallback::{
    ArcadeDefaults, DatalogDefaults, SearchDefaults, ZeroentropyDefaults,
};
use crate::collaborators::panel::AnalysisPanel;
use crate::collaborators::search::SearchStage;
use crate::collaborators::web_search::GoogleSearch;
use crate::collaborators::zeroentropy::ZeroentropyAnalyzer;
use crate::config::Config;
use crate::directory::Directory;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<Directory>,
    /// Zeroentropy, Arcade and Datalog, each with its own synthetic table.
    pub analysis: AnalysisPanel,
    pub search: SearchStage,
}

impl AppState {
    /// Wires the live collaborators, each backed by its default synthetic table.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = build_http_client(config.outbound_timeout)?;
        let timeout = config.outbound_timeout;

        let mut zeroentropy = ZeroentropyAnalyzer::new(
            client.clone(),
            config.zeroentropy_api_key.clone(),
            timeout,
            ZeroentropyDefaults::default(),
        );
        if let Some(endpoints) = &config.zeroentropy_endpoints {
            zeroentropy = zeroentropy.with_endpoints(endpoints.clone());
        }

        let mut arcade = ArcadeAnalyzer::new(
            client.clone(),
            config.arcade_api_key.clone(),
            config.arcade_user_id.clone(),
            timeout,
            ArcadeDefaults::default(),
        );
        if let Some(base_url) = &config.arcade_base_url {
            arcade = arcade.with_base_url(base_url.clone());
        }

        let mut datalog = DatalogAnalyzer::new(
            client.clone(),
            config.datalog_api_key.clone(),
            timeout,
            DatalogDefaults::default(),
        );
        if let Some(endpoints) = &config.datalog_endpoints {
            datalog = datalog.with_endpoints(endpoints.clone());
        }

        let mut google = GoogleSearch::new(
            client,
            config.google_api_key.clone(),
            config.google_cse_id.clone(),
            timeout,
        );
        if let Some(url) = &config.google_search_url {
            google = google.with_base_url(url.clone());
        }

        let analysis = AnalysisPanel::new(Arc::new(zeroentropy), Arc::new(arcade), Arc::new(datalog));
        let search = SearchStage::new(Arc::new(google), SearchDefaults::default());

        let directory = Directory::load(config.directory_path.as_deref())?;

        Ok(AppState {
            config,
            directory: Arc::new(directory),
            analysis,
            search,
        })
    }
}
