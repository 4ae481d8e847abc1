//! Analyzer seam and the analyse-then-flatten pipeline.

use async_trait::async_trait;
use textlens_core::{flatten, AnalysisRequest, AnalysisResponse, AnalysisTables, Credentials, NluResult};
use tracing::warn;

/// Something that can run one NLU analysis call.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
    ) -> NluResult<AnalysisResponse>;
}

/// Run one analysis and flatten the response into fresh tables.
pub async fn run_analysis(
    analyzer: &dyn TextAnalyzer,
    request: &AnalysisRequest,
    credentials: &Credentials,
) -> NluResult<AnalysisTables> {
    let response = analyzer.analyze(request, credentials).await?;
    flatten(&response).inspect_err(|e| warn!(error = %e, "Could not tabulate analysis response"))
}
