//! Request/response shapes for the HTTP endpoints.

pub mod analysis;
pub mod language;
pub mod secret;

pub use analysis::{AnalysisRequest, AnalysisResponse, GeoLocation};
pub use language::Language;
pub use secret::{SecretRequest, SecretResponse};
