//! # TextLens Client
//!
//! HTTP client for the Watson Natural Language Understanding `analyze` API.
//!
//! Exchanges the API key for an IAM bearer token, submits one analysis
//! request and returns the typed response. The [`TextAnalyzer`] trait is the
//! seam the web layer depends on.

pub mod analyzer;
pub mod iam;
pub mod nlu;

pub use analyzer::{run_analysis, TextAnalyzer};
pub use iam::IamAuthenticator;
pub use nlu::{ClientConfig, NluClient};
