//! JSON analysis endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use textlens_client::run_analysis;
use textlens_core::{AnalysisRequest, AnalysisTables, Credentials, InputMode, NluError};
use tracing::warn;

use super::status_for;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyseRequest {
    #[serde(default)]
    pub mode: InputMode,
    pub api_key: String,
    pub endpoint_url: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

fn error_response(err: NluError) -> (StatusCode, Json<ErrorBody>) {
    (
        status_for(&err),
        Json(ErrorBody {
            error: err.to_string(),
            kind: err.kind(),
        }),
    )
}

/// POST /api/analyse - Run one analysis and return the four tables.
pub async fn analyse(
    State(state): State<AppState>,
    Json(req): Json<AnalyseRequest>,
) -> Result<Json<AnalysisTables>, (StatusCode, Json<ErrorBody>)> {
    let credentials = Credentials::new(&req.api_key, &req.endpoint_url).map_err(error_response)?;
    let request = AnalysisRequest::new(req.mode, &req.content).map_err(error_response)?;

    let tables = run_analysis(state.analyzer.as_ref(), &request, &credentials)
        .await
        .map_err(|e| {
            warn!(kind = e.kind(), error = %e, "Analysis failed");
            error_response(e)
        })?;

    Ok(Json(tables))
}
