//! Analysis fan-out: runs the three analysis collaborators concurrently.
//!
//! Each call runs in its own task: a client disconnect drops the request
//! future but not the outbound calls, which finish or hit their timeout.
//! A failing collaborator is replaced by its synthetic payload without
//! affecting the other two.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn, Instrument, Span};

use crate::collaborators::{AnalysisProvider, DataSource, ProviderError};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub data: Value,
    pub source: DataSource,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub zeroentropy: AnalysisOutcome,
    pub arcade: AnalysisOutcome,
    pub datalog: AnalysisOutcome,
}

#[derive(Clone)]
pub struct AnalysisPanel {
    zeroentropy: Arc<dyn AnalysisProvider>,
    arcade: Arc<dyn AnalysisProvider>,
    datalog: Arc<dyn AnalysisProvider>,
}

impl AnalysisPanel {
    pub fn new(
        zeroentropy: Arc<dyn AnalysisProvider>,
        arcade: Arc<dyn AnalysisProvider>,
        datalog: Arc<dyn AnalysisProvider>,
    ) -> Self {
        Self {
            zeroentropy,
            arcade,
            datalog,
        }
    }

    /// Resolves once all three calls settle. Only a panicked task is an error.
    pub async fn run(&self, job_description: &str) -> Result<AnalysisReport> {
        let (zeroentropy, arcade, datalog) = tokio::join!(
            spawn_analysis(self.zeroentropy.clone(), job_description),
            spawn_analysis(self.arcade.clone(), job_description),
            spawn_analysis(self.datalog.clone(), job_description),
        );

        Ok(AnalysisReport {
            zeroentropy: zeroentropy?,
            arcade: arcade?,
            datalog: datalog?,
        })
    }
}

async fn spawn_analysis(
    provider: Arc<dyn AnalysisProvider>,
    job_description: &str,
) -> Result<AnalysisOutcome> {
    let name = provider.name();
    let job_description = job_description.to_string();

    tokio::spawn(
        async move { analyze_or_synthetic(provider.as_ref(), &job_description).await }
            .instrument(Span::current()),
    )
    .await
    .with_context(|| format!("{name} analysis task did not complete"))
}

/// Calls the collaborator once and swaps in its synthetic payload on any failure.
pub async fn analyze_or_synthetic(
    provider: &dyn AnalysisProvider,
    job_description: &str,
) -> AnalysisOutcome {
    let failure = match provider.analyze(job_description).await {
        Ok(data) if !data.is_null() => {
            return AnalysisOutcome {
                data,
                source: DataSource::Live,
            }
        }
        Ok(_) => ProviderError::Decode(format!("{} (null payload)", provider.name())),
        Err(e) => e,
    };

    match failure {
        ProviderError::MissingCredential => {
            info!("Using synthetic {} analysis (no API key provided)", provider.name())
        }
        e => warn!("{} analysis failed, using synthetic data: {e}", provider.name()),
    }

    AnalysisOutcome {
        data: provider.synthetic(job_description),
        source: DataSource::Synthetic,
    }
}
