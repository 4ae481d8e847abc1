//! Analysis request and credential models.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{NluError, NluResult};

/// Language sent with every analysis request.
pub const DEFAULT_LANGUAGE: &str = "en";

/// What the submitted content is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Url,
}

impl InputMode {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
        }
    }

    /// Label shown in the input type selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Url => "URL",
        }
    }
}

/// A single analysis submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    mode: InputMode,
    content: String,
    language: String,
}

impl AnalysisRequest {
    /// Build a request, rejecting empty content and, in URL mode, anything
    /// that is not an absolute http(s) URL.
    pub fn new(mode: InputMode, content: &str) -> NluResult<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NluError::validation(match mode {
                InputMode::Text => "Enter text to be analysed",
                InputMode::Url => "Enter URL to be analysed",
            }));
        }

        if mode == InputMode::Url {
            parse_http_url(content, "URL to be analysed")?;
        }

        Ok(Self {
            mode,
            content: content.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Shorthand for a text-mode request.
    pub fn text(content: &str) -> NluResult<Self> {
        Self::new(InputMode::Text, content)
    }

    /// Shorthand for a URL-mode request.
    pub fn url(content: &str) -> NluResult<Self> {
        Self::new(InputMode::Url, content)
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Service credentials entered alongside a request. Never persisted.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    endpoint_url: Url,
}

impl Credentials {
    pub fn new(api_key: &str, endpoint_url: &str) -> NluResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(NluError::validation("Enter API key"));
        }

        let endpoint_url = endpoint_url.trim();
        if endpoint_url.is_empty() {
            return Err(NluError::validation("Enter endpoint URL"));
        }

        let endpoint_url = parse_http_url(endpoint_url, "endpoint URL")?;
        if endpoint_url.query().is_some() || endpoint_url.fragment().is_some() {
            return Err(NluError::validation(
                "Invalid endpoint URL: remove the query string or fragment",
            ));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            endpoint_url,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url.as_str())
            .finish()
    }
}

fn parse_http_url(raw: &str, what: &str) -> NluResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| NluError::validation(format!("Invalid {}: {}", what, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NluError::validation(format!(
            "Invalid {}: unsupported scheme '{}'",
            what, other
        ))),
    }
}
