//! Recommendation pipeline: analysis fan-out → classify → locate → search → rank.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::collaborators::DataSource;
use crate::errors::AppError;
use crate::matching::location::extract_location;
use crate::matching::ranker::rank;
use crate::matching::trade_type::{classify, Category};
use crate::models::provider::ServiceProvider;
use crate::state::AppState;

/// Per-collaborator analysis payloads, passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub zeroentropy: Value,
    pub arcade: Value,
    pub datalog: Value,
}

/// Which parts of a response came from real collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct DataSources {
    pub zeroentropy: DataSource,
    pub arcade: DataSource,
    pub datalog: DataSource,
    pub search: DataSource,
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub trade_type: Category,
    pub location: String,
    pub analysis: AnalysisBundle,
    pub sources: DataSources,
    pub recommendations: Vec<ServiceProvider>,
}

/// Runs the full pipeline for one job description.
///
/// Collaborator failures never surface here; only a crashed collaborator
/// task produces an error.
pub async fn recommend(state: &AppState, job_description: &str) -> Result<Recommendation, AppError> {
    let span = info_span!("recommend", request_id = %Uuid::new_v4());
    run_pipeline(state, job_description).instrument(span).await
}

async fn run_pipeline(state: &AppState, job_description: &str) -> Result<Recommendation, AppError> {
    let report = state.analysis.run(job_description).await?;

    let trade_type = classify(job_description);
    let location = extract_location(job_description)
        .unwrap_or_else(|| state.config.default_location.clone());

    let found = state.search.run(trade_type, &location).await?;
    let recommendations = rank(state.directory.providers(), found.providers, trade_type);

    info!(
        "Recommended {} providers for {trade_type} job in {location} (search: {:?})",
        recommendations.len(),
        found.source
    );

    Ok(Recommendation {
        trade_type,
        location,
        sources: DataSources {
            zeroentropy: report.zeroentropy.source,
            arcade: report.arcade.source,
            datalog: report.datalog.source,
            search: found.source,
        },
        analysis: AnalysisBundle {
            zeroentropy: report.zeroentropy.data,
            arcade: report.arcade.data,
            datalog: report.datalog.data,
        },
        recommendations,
    })
}
