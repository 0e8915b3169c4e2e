pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod redaction;

pub use prompts::{PromptProfile, RequestKind};
pub use providers::{ContentProvider, ContentRequest, InlineImage, ProviderError};
pub use redaction::redact;
