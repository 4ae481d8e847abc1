//! TextLens Core Library
//!
//! Request model, NLU response records and the flattening of an analysis
//! response into display tables.

pub mod error;
pub mod request;
pub mod response;
pub mod table;

pub use error::{NluError, NluResult};
pub use request::{AnalysisRequest, Credentials, InputMode};
pub use response::AnalysisResponse;
pub use table::{flatten, flatten_json, AnalysisTables, Table};
