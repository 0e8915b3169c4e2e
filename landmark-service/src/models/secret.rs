use serde::{Deserialize, Serialize};

/// Body of `POST /api/getSecret`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRequest {
    pub landmark_name: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretResponse {
    pub secret: String,
    pub success: bool,
}

impl SecretResponse {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            success: true,
        }
    }
}
