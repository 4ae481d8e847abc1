//! Wire records for the NLU `analyze` response.
//!
//! Every field is optional so that an absent path can be reported as
//! [`NluError::MissingField`](crate::NluError::MissingField) by the flattener
//! instead of failing deserialization of the whole body.

use serde::{Deserialize, Serialize};

/// Top-level analysis response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub language: Option<String>,
    pub retrieved_url: Option<String>,
    pub entities: Option<Vec<EntityRecord>>,
    pub keywords: Option<Vec<KeywordRecord>>,
    pub concepts: Option<Vec<ConceptRecord>>,
    pub categories: Option<Vec<CategoryRecord>>,
    /// Requested with every call but not rendered.
    #[serde(default)]
    pub semantic_roles: Vec<serde_json::Value>,
}

impl AnalysisResponse {
    /// Parse a raw JSON body.
    pub fn from_json(body: &str) -> crate::NluResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub score: Option<f64>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub sadness: Option<f64>,
    pub joy: Option<f64>,
    pub fear: Option<f64>,
    pub disgust: Option<f64>,
    pub anger: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub confidence: Option<f64>,
    pub relevance: Option<f64>,
    pub sentiment: Option<SentimentRecord>,
    pub emotion: Option<EmotionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub text: Option<String>,
    pub count: Option<u64>,
    pub relevance: Option<f64>,
    pub sentiment: Option<SentimentRecord>,
    pub emotion: Option<EmotionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub text: Option<String>,
    pub relevance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub label: Option<String>,
    pub score: Option<f64>,
}
