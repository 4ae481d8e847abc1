//! Natural Language Understanding HTTP client.
//!
//! Calls `POST {endpoint}/v1/analyze?version=2020-08-01` with a fixed feature
//! set: entities and keywords with sentiment and emotion (limit 50), concepts
//! and categories (limit 10), and semantic roles.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use textlens_core::{AnalysisRequest, AnalysisResponse, Credentials, InputMode, NluError, NluResult};
use tracing::{debug, info};

use crate::analyzer::TextAnalyzer;
use crate::iam::{IamAuthenticator, DEFAULT_IAM_URL};

/// API version date sent with every call.
pub const API_VERSION: &str = "2020-08-01";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const ENTITY_LIMIT: u32 = 50;
const KEYWORD_LIMIT: u32 = 50;
const CONCEPT_LIMIT: u32 = 10;
const CATEGORY_LIMIT: u32 = 10;

/// Longest error body kept in error messages.
const MAX_BODY_EXCERPT: usize = 300;

/// Client settings that are not per-request credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub iam_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            iam_url: DEFAULT_IAM_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// NLU client.
#[derive(Clone)]
pub struct NluClient {
    client: reqwest::Client,
    iam: IamAuthenticator,
}

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    language: &'a str,
    features: Features,
}

#[derive(Serialize)]
struct Features {
    entities: SpanOptions,
    keywords: SpanOptions,
    concepts: LimitOptions,
    categories: LimitOptions,
    semantic_roles: SemanticRolesOptions,
}

#[derive(Serialize)]
struct SpanOptions {
    sentiment: bool,
    emotion: bool,
    limit: u32,
}

#[derive(Serialize)]
struct LimitOptions {
    limit: u32,
}

#[derive(Serialize)]
struct SemanticRolesOptions {}

impl Features {
    fn standard() -> Self {
        Self {
            entities: SpanOptions {
                sentiment: true,
                emotion: true,
                limit: ENTITY_LIMIT,
            },
            keywords: SpanOptions {
                sentiment: true,
                emotion: true,
                limit: KEYWORD_LIMIT,
            },
            concepts: LimitOptions { limit: CONCEPT_LIMIT },
            categories: LimitOptions { limit: CATEGORY_LIMIT },
            semantic_roles: SemanticRolesOptions {},
        }
    }
}

impl<'a> AnalyzeBody<'a> {
    fn from_request(request: &'a AnalysisRequest) -> Self {
        let (text, url) = match request.mode() {
            InputMode::Text => (Some(request.content()), None),
            InputMode::Url => (None, Some(request.content())),
        };
        Self {
            text,
            url,
            language: request.language(),
            features: Features::standard(),
        }
    }
}

impl NluClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self {
            iam: IamAuthenticator::new(&config.iam_url, client.clone()),
            client,
        }
    }

    /// Create a client with default settings (IBM Cloud IAM, 60s timeout).
    pub fn default_client() -> Self {
        Self::new(&ClientConfig::default())
    }

    /// Run one analysis call.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
    ) -> NluResult<AnalysisResponse> {
        let token = self.iam.token(credentials.api_key()).await?;
        let endpoint = analyze_url(credentials)?;

        info!(mode = request.mode().as_str(), endpoint = %endpoint, "Submitting analysis request");

        let response = self
            .client
            .post(&endpoint)
            .query(&[("version", API_VERSION)])
            .bearer_auth(token)
            .json(&AnalyzeBody::from_request(request))
            .send()
            .await
            .map_err(|e| transport_error("Failed to reach NLU service", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read NLU response", e))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let result = AnalysisResponse::from_json(&body)?;

        debug!(
            language = result.language.as_deref().unwrap_or("-"),
            retrieved_url = result.retrieved_url.as_deref().unwrap_or("-"),
            "Received analysis response"
        );

        Ok(result)
    }
}

#[async_trait]
impl TextAnalyzer for NluClient {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
    ) -> NluResult<AnalysisResponse> {
        NluClient::analyze(self, request, credentials).await
    }
}

fn analyze_url(credentials: &Credentials) -> NluResult<String> {
    let mut url = credentials.endpoint_url().clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| NluError::validation("Invalid endpoint URL: cannot be a base URL"))?
        .pop_if_empty()
        .extend(["v1", "analyze"]);
    Ok(url.into())
}

fn status_error(status: StatusCode, body: &str) -> NluError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NluError::Authentication(format!(
            "NLU service rejected the credentials ({}): {}",
            status,
            body_excerpt(body)
        )),
        _ => NluError::Transport(format!(
            "NLU API error ({}): {}",
            status,
            body_excerpt(body)
        )),
    }
}

pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> NluError {
    let detail = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    NluError::Transport(format!("{}: {}", context, detail))
}

pub(crate) fn body_excerpt(body: &str) -> &str {
    let body = body.trim();
    if body.len() <= MAX_BODY_EXCERPT {
        return body;
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    async fn mock_iam(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"tok-123","expires_in":3600}"#)
            .create_async()
            .await
    }

    fn client_for(server: &ServerGuard) -> NluClient {
        NluClient::new(&ClientConfig {
            iam_url: format!("{}/identity/token", server.url()),
            timeout: Duration::from_secs(5),
        })
    }

    fn credentials_for(server: &ServerGuard) -> Credentials {
        Credentials::new("my-key", &format!("{}/instances/abc/", server.url())).unwrap()
    }

    #[test]
    fn test_text_body() {
        let request = AnalysisRequest::text("IBM is a great company.").unwrap();
        let body = serde_json::to_value(AnalyzeBody::from_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "text": "IBM is a great company.",
                "language": "en",
                "features": {
                    "entities": {"sentiment": true, "emotion": true, "limit": 50},
                    "keywords": {"sentiment": true, "emotion": true, "limit": 50},
                    "concepts": {"limit": 10},
                    "categories": {"limit": 10},
                    "semantic_roles": {}
                }
            })
        );
    }

    #[test]
    fn test_url_body_omits_text() {
        let request = AnalysisRequest::url("https://www.ibm.com").unwrap();
        let body = serde_json::to_value(AnalyzeBody::from_request(&request)).unwrap();
        assert_eq!(body["url"], "https://www.ibm.com");
        assert!(body.get("text").is_none());
    }

    #[test]
    fn test_analyze_url_appends_path_segments() {
        let creds = Credentials::new("k", "https://api.example.com/instances/abc/").unwrap();
        assert_eq!(
            analyze_url(&creds).unwrap(),
            "https://api.example.com/instances/abc/v1/analyze"
        );

        let creds = Credentials::new("k", "https://api.example.com").unwrap();
        assert_eq!(
            analyze_url(&creds).unwrap(),
            "https://api.example.com/v1/analyze"
        );
    }

    #[test]
    fn test_body_excerpt_truncates() {
        let long = "é".repeat(400);
        assert!(body_excerpt(&long).len() <= MAX_BODY_EXCERPT);
        assert_eq!(body_excerpt("  short  "), "short");
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let mut server = Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let analyze = server
            .mock("POST", "/instances/abc/v1/analyze")
            .match_query(Matcher::UrlEncoded("version".into(), API_VERSION.into()))
            .match_header("authorization", "Bearer tok-123")
            .match_body(Matcher::PartialJson(json!({
                "text": "IBM is a great company.",
                "language": "en"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "language": "en",
                    "entities": [],
                    "keywords": [],
                    "concepts": [],
                    "categories": [{"label": "/technology and computing", "score": 0.9}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let request = AnalysisRequest::text("IBM is a great company.").unwrap();
        let response = client
            .analyze(&request, &credentials_for(&server))
            .await
            .unwrap();

        analyze.assert_async().await;
        assert_eq!(response.categories.map(|c| c.len()), Some(1));
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let mut server = Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let _analyze = server
            .mock("POST", "/instances/abc/v1/analyze")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"code":401,"error":"Unauthorized"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let request = AnalysisRequest::text("hello").unwrap();
        let err = client
            .analyze(&request, &credentials_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, NluError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let mut server = Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let _analyze = server
            .mock("POST", "/instances/abc/v1/analyze")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = client_for(&server);
        let request = AnalysisRequest::text("hello").unwrap();
        let err = client
            .analyze(&request, &credentials_for(&server))
            .await
            .unwrap_err();
        match err {
            NluError::Transport(msg) => assert!(msg.contains("500")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_instance_path_is_transport_error() {
        let mut server = Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let _analyze = server
            .mock("POST", "/instances/abc/v1/analyze")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"code":404,"error":"Not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let request = AnalysisRequest::text("hello").unwrap();
        let err = client
            .analyze(&request, &credentials_for(&server))
            .await
            .unwrap_err();
        match err {
            NluError::Transport(msg) => assert!(msg.contains("404")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let mut server = Server::new_async().await;
        let _iam = mock_iam(&mut server).await;

        let client = client_for(&server);
        let request = AnalysisRequest::text("hello").unwrap();
        // Port 9 (discard) on localhost is not listening.
        let creds = Credentials::new("my-key", "http://127.0.0.1:9").unwrap();
        let err = client.analyze(&request, &creds).await.unwrap_err();
        assert!(matches!(err, NluError::Transport(_)));
    }
}
