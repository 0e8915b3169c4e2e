//! Mock provider for testing.

use super::{ContentProvider, ContentRequest, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Upstream { status: u16, body: String },
    Invalid(String),
}

/// Answers every call with a canned reply and remembers what it was asked.
pub struct MockProvider {
    reply: MockReply,
    requests: Mutex<Vec<ContentRequest>>,
}

impl MockProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockReply::Upstream {
            status,
            body: body.into(),
        })
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(MockReply::Invalid(message.into()))
    }

    fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ContentRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn generate(&self, request: &ContentRequest) -> Result<String, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Upstream { status, body } => Err(ProviderError::Upstream {
                provider: self.name(),
                status: *status,
                body: body.clone(),
            }),
            MockReply::Invalid(message) => Err(ProviderError::InvalidResponse(message.clone())),
        }
    }
}
