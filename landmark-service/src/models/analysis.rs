use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/gemini`.
///
/// Every field is optional at the type level so that a missing `imageData`
/// surfaces as a 400 from the handler rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Base64-encoded JPEG, without a `data:` prefix.
    pub image_data: Option<String>,
    /// Optional context; an unusable value is dropped rather than rejected.
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<GeoLocation>,
    /// Free-form instructions appended to the descriptive prompt.
    pub mode_description: Option<String>,
    /// Two-letter language code.
    pub language: Option<String>,
    /// `"quickDetect"` selects the landmark classifier.
    pub request_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Numbers or numeric strings within the usual ranges. Anything else,
    /// including a missing half, yields no location.
    fn from_json(value: &Value) -> Option<Self> {
        let coordinate = |key: &str, bound: f64| {
            let n = match value.get(key)? {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                _ => return None,
            };
            (n.is_finite() && n.abs() <= bound).then_some(n)
        };

        Some(Self {
            latitude: coordinate("latitude", 90.0)?,
            longitude: coordinate("longitude", 180.0)?,
        })
    }
}

fn lenient_location<'de, D>(deserializer: D) -> Result<Option<GeoLocation>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(GeoLocation::from_json))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub text: String,
    pub success: bool,
}

impl AnalysisResponse {
    pub fn new(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}
