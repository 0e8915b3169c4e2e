//! Prompt catalogue.
//!
//! Each (profile, request kind) pair maps to one fixed template. Templates use
//! `{location}`, `{mode}` and `{language}` placeholders; the location hint has
//! its own `{latitude}`/`{longitude}` placeholders and is dropped entirely when
//! the caller sent no location.

use crate::models::{GeoLocation, Language};
use std::fmt;
use std::str::FromStr;

/// Service-wide wording profile, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptProfile {
    /// The plain prompts. Replies are returned as-is.
    Standard,
    /// Stricter prompts with anti-hallucination and privacy rules. Replies go
    /// through the redaction pass.
    #[default]
    Private,
}

impl PromptProfile {
    pub fn redacts_output(self) -> bool {
        matches!(self, PromptProfile::Private)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptProfile::Standard => "standard",
            PromptProfile::Private => "private",
        }
    }
}

impl fmt::Display for PromptProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PromptProfile::Standard),
            "private" | "privacy" => Ok(PromptProfile::Private),
            other => Err(anyhow::anyhow!(
                "unknown prompt profile '{}', expected 'standard' or 'private'",
                other
            )),
        }
    }
}

/// What the caller asked for, from the request's `requestType` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Short landmark / not-landmark verdict.
    QuickDetect,
    /// Full description.
    Describe,
}

impl RequestKind {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("quickDetect") => RequestKind::QuickDetect,
            _ => RequestKind::Describe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::QuickDetect => "quick_detect",
            RequestKind::Describe => "describe",
        }
    }
}

struct PromptTemplate {
    location_hint: &'static str,
    body: &'static str,
}

const STANDARD_QUICK_DETECT: PromptTemplate = PromptTemplate {
    location_hint: "User at Lat {latitude}, Lon {longitude}.",
    body: "Analyze this image. {location} \
           If historical landmark: \"LANDMARK: [Name]\". If not: \"NOT_LANDMARK: [reason]\". \
           Respond in {language}. Max 50 words.",
};

const STANDARD_DESCRIBE: PromptTemplate = PromptTemplate {
    location_hint: "Location: {latitude}, {longitude}",
    body: "Analyze this landmark photo. {location} {mode} Respond in {language}. \
           Start with \"NAME:\" then description. 150-250 words. No markdown.",
};

const PRIVATE_QUICK_DETECT: PromptTemplate = PromptTemplate {
    location_hint: "Internal hint, never repeat it: the photo was taken near \
                    {latitude}, {longitude}.",
    body: "Classify this image. {location}\n\
           If the image itself clearly shows a historical landmark, reply \"LANDMARK: [Name]\". \
           Otherwise reply \"NOT_LANDMARK: [reason]\".\n\
           Only name a landmark you can recognise in the image; do not guess from the location hint.\n\
           Never mention coordinates, latitude, longitude or where the user is.\n\
           Respond in {language}. Max 50 words.",
};

const PRIVATE_DESCRIBE: PromptTemplate = PromptTemplate {
    location_hint: "Internal hint for disambiguation only, never repeat or paraphrase it: \
                    the photo was taken near {latitude}, {longitude}.",
    body: "Analyze this landmark photo. {location}\n\
           {mode}\n\
           Rules:\n\
           - Describe only what you can recognise in the image. If you are not sure which \
           landmark this is, say so instead of inventing a name, dates or facts.\n\
           - Never include coordinates, latitude, longitude, street addresses or distances.\n\
           - Never phrase the answer as \"you are at X\" or \"you are standing in front of X\"; \
           talk about the landmark, not about the user.\n\
           Respond in {language}. Start with \"NAME:\" then description. \
           150-250 words. No markdown.",
};

fn template(profile: PromptProfile, kind: RequestKind) -> &'static PromptTemplate {
    match (profile, kind) {
        (PromptProfile::Standard, RequestKind::QuickDetect) => &STANDARD_QUICK_DETECT,
        (PromptProfile::Standard, RequestKind::Describe) => &STANDARD_DESCRIBE,
        (PromptProfile::Private, RequestKind::QuickDetect) => &PRIVATE_QUICK_DETECT,
        (PromptProfile::Private, RequestKind::Describe) => &PRIVATE_DESCRIBE,
    }
}

/// Inputs an image-analysis prompt is rendered from.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContext<'a> {
    pub language: Language,
    pub location: Option<GeoLocation>,
    pub mode_description: Option<&'a str>,
}

pub fn analysis_prompt(profile: PromptProfile, kind: RequestKind, ctx: &PromptContext<'_>) -> String {
    let template = template(profile, kind);

    let location = ctx
        .location
        .map(|loc| {
            template
                .location_hint
                .replace("{latitude}", &loc.latitude.to_string())
                .replace("{longitude}", &loc.longitude.to_string())
        })
        .unwrap_or_default();

    let rendered = template
        .body
        .replace("{location}", &location)
        .replace("{mode}", ctx.mode_description.unwrap_or("").trim())
        .replace("{language}", ctx.language.display_name());

    tidy(&rendered)
}

/// Trivia prompt for the fact-lookup endpoint.
pub fn secret_prompt(landmark_name: &str, language: Language) -> String {
    format!(
        "Tell me a secret about \"{}\". Respond in {}. 50-100 words. No markdown.",
        landmark_name.trim(),
        language.display_name()
    )
}

/// Collapse the gaps left by empty placeholders and drop blank lines.
fn tidy(prompt: &str) -> String {
    prompt
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
