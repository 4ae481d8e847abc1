//! Route handlers.

pub mod analysis_html;
pub mod api;

use axum::http::StatusCode;
use textlens_core::NluError;

/// HTTP status reported for an analysis failure.
pub(crate) fn status_for(err: &NluError) -> StatusCode {
    match err {
        NluError::Validation(_) => StatusCode::BAD_REQUEST,
        NluError::Authentication(_) => StatusCode::UNAUTHORIZED,
        NluError::Transport(_) => StatusCode::BAD_GATEWAY,
        NluError::MissingField { .. } | NluError::MalformedResponse(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

/// GET /health - Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
