//! HTML analysis page handlers.
//!
//! The page is re-rendered in full on every submission; the four tables come
//! from the current analysis only.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use textlens_client::run_analysis;
use textlens_core::{AnalysisRequest, AnalysisTables, Credentials, InputMode, NluError, NluResult, Table};
use tracing::{info, warn};

use super::status_for;
use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct AnalysisPage {
    mode: String,
    endpoint_url: String,
    text: String,
    url: String,
    error: Option<ErrorView>,
    tables: Vec<TableView>,
}

struct ErrorView {
    heading: String,
    message: String,
}

/// View model for one result table.
struct TableView {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableView {
    fn from_table(table: Table) -> Self {
        Self {
            title: table.title.to_string(),
            headers: table.headers.iter().map(|h| h.to_string()).collect(),
            rows: table.rows,
        }
    }
}

impl ErrorView {
    fn from_error(err: &NluError) -> Self {
        let heading = match err {
            NluError::Validation(_) => "Check your input",
            NluError::Authentication(_) => "Authentication failed",
            NluError::Transport(_) => "Service unavailable",
            NluError::MissingField { .. } | NluError::MalformedResponse(_) => {
                "Unexpected analysis response"
            }
        };
        Self {
            heading: heading.to_string(),
            message: err.to_string(),
        }
    }
}

impl AnalysisPage {
    fn blank() -> Self {
        Self {
            mode: InputMode::Text.as_str().to_string(),
            endpoint_url: String::new(),
            text: String::new(),
            url: String::new(),
            error: None,
            tables: Vec::new(),
        }
    }

    /// Page pre-filled from a submission. The API key is never echoed back.
    fn from_form(form: &AnalyseForm) -> Self {
        Self {
            mode: form.input_mode().as_str().to_string(),
            endpoint_url: form.endpoint_url.clone(),
            text: form.text.clone(),
            url: form.url.clone(),
            ..Self::blank()
        }
    }

    fn with_tables(mut self, tables: &AnalysisTables) -> Self {
        self.tables = tables.tables().into_iter().map(TableView::from_table).collect();
        self
    }

    fn with_error(mut self, err: &NluError) -> Self {
        self.error = Some(ErrorView::from_error(err));
        self
    }
}

// ============================================================
// REQUEST TYPES
// ============================================================

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AnalyseForm {
    pub mode: String,
    pub api_key: String,
    pub endpoint_url: String,
    pub text: String,
    pub url: String,
}

impl AnalyseForm {
    fn input_mode(&self) -> InputMode {
        InputMode::from_str(&self.mode).unwrap_or_default()
    }

    fn prepare(&self) -> NluResult<(AnalysisRequest, Credentials)> {
        let mode = InputMode::from_str(&self.mode)
            .ok_or_else(|| NluError::validation("Select your input type"))?;
        let credentials = Credentials::new(&self.api_key, &self.endpoint_url)?;
        let content = match mode {
            InputMode::Text => &self.text,
            InputMode::Url => &self.url,
        };
        let request = AnalysisRequest::new(mode, content)?;
        Ok((request, credentials))
    }
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the empty analysis form.
pub async fn index() -> Response {
    render(StatusCode::OK, AnalysisPage::blank())
}

/// POST /analyse - Run one analysis and render the form with its tables.
pub async fn analyse(State(state): State<AppState>, Form(form): Form<AnalyseForm>) -> Response {
    let page = AnalysisPage::from_form(&form);

    let (request, credentials) = match form.prepare() {
        Ok(inputs) => inputs,
        Err(e) => return render(status_for(&e), page.with_error(&e)),
    };

    match run_analysis(state.analyzer.as_ref(), &request, &credentials).await {
        Ok(tables) => {
            info!(
                entities = tables.entities.len(),
                keywords = tables.keywords.len(),
                "Analysis rendered"
            );
            render(StatusCode::OK, page.with_tables(&tables))
        }
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Analysis failed");
            render(status_for(&e), page.with_error(&e))
        }
    }
}

// ============================================================
// HELPERS
// ============================================================

fn render(status: StatusCode, page: AnalysisPage) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}
