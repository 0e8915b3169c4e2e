use crate::services::providers::gemini::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};
use crate::services::PromptProfile;
use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Request bodies above this size are refused with a 413. Base64 inflates a
/// phone JPEG by a third, so this leaves room for photos of 7 MB or so.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Service configuration, loaded once at startup and never reloaded.
#[derive(Debug, Clone, Deserialize)]
pub struct LandmarkConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub prompt_profile: PromptProfile,
    pub max_body_bytes: usize,
    /// OTLP collector for span export; local JSON logs only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Missing key is not a startup failure: the service comes up and answers
    /// API calls with a configuration error.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
}

impl LandmarkConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);

        let prompt_profile = get_env("PROMPT_PROFILE", Some("private"), is_prod)?
            .parse()
            .map_err(AppError::ConfigError)?;

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(raw) => parse_body_limit(&raw)?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(LandmarkConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), false)?,
            },
            prompt_profile,
            max_body_bytes,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|e| !e.is_empty()),
        })
    }
}

impl<'de> Deserialize<'de> for PromptProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_body_limit(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "MAX_BODY_BYTES must be a positive byte count, got '{}'",
            raw
        ))),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
