//! Application state.

use std::sync::Arc;
use textlens_client::TextAnalyzer;

/// Application state shared across handlers.
///
/// Holds no per-analysis data: tables are built fresh for every request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn TextAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self { analyzer }
    }
}
