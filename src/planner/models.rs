use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/tasks/check-weather`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckWeatherRequest {
    pub city: String,
    pub date: NaiveDate,
    pub activity_id: u32,
}

/// Raw response envelope. Every level may be absent; normalization fills
/// the holes.
#[derive(Debug, Default, Deserialize)]
pub struct CheckWeatherResponse {
    #[serde(default)]
    pub recommendation: Option<RawRecommendation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawRecommendation {
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub details: Option<WeatherDetails>,
}

/// Weather readings echoed back with a recommendation. Temperature is in
/// °C and wind speed in m/s, like the source weather API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDetails {
    pub temperature: Option<f64>,
    pub conditions: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Fully-populated recommendation record; never constructed with holes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    /// 0-100, produced by the task-weather-check service
    pub score: u8,
    pub text: String,
    pub details: WeatherDetails,
}

impl RecommendationResult {
    /// Shown when the upstream payload carries no recommendation text.
    pub const FALLBACK_TEXT: &'static str = "Aucune recommandation disponible";

    /// Total normalization: any payload shape, including an empty object,
    /// yields a complete record.
    pub fn from_response(response: CheckWeatherResponse) -> Self {
        let raw = response.recommendation.unwrap_or_default();
        Self {
            score: raw.score.unwrap_or(0),
            text: raw
                .recommendation
                .unwrap_or_else(|| Self::FALLBACK_TEXT.to_string()),
            details: raw.details.unwrap_or_default(),
        }
    }
}
