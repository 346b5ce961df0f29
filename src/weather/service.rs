use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use indexmap::IndexSet;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::*;
use crate::display;
use crate::error::{ErrorKind, UserFacing};

/// Country codes rejected after an otherwise successful fetch. This is a
/// content rule on the response, not a transport failure, and it lives in
/// the client on purpose.
const BLOCKED_COUNTRIES: [&str; 1] = ["IL"];

/// Cap on the dashboard forecast strip.
const FORECAST_DAYS: usize = 5;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather service returned HTTP {0}")]
    Api(StatusCode),

    #[error("Location policy rejected country code: {0}")]
    BlockedLocation(String),

    #[error("Invalid API response: no weather information available")]
    MissingConditions,
}

impl UserFacing for WeatherError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) | Self::CityNotFound(_) | Self::Api(_) => ErrorKind::Network,
            Self::BlockedLocation(_) => ErrorKind::ContentPolicy,
            Self::MissingConditions => ErrorKind::Malformed,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::CityNotFound(_) => "Ville introuvable".to_string(),
            Self::BlockedLocation(_) => "Cette localisation n'est pas disponible".to_string(),
            Self::Request(_) | Self::Api(_) => {
                "Impossible de contacter le service météo".to_string()
            }
            Self::MissingConditions => "Données météo indisponibles".to_string(),
        }
    }
}

/// Fetch seam for the dashboard. The view orchestrates against this trait so
/// it can be exercised with stub providers in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions, normalized and policy-checked.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// The deduplicated 5-day strip.
    async fn daily_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError>;
}

pub struct WeatherService {
    client: Client,
    base_url: String,
    display_tz: Tz,
}

impl WeatherService {
    pub fn new(client: Client, base_url: &str, display_tz: Tz) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            display_tz,
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        tracing::debug!(city = %city, "Fetching current conditions");

        let response = self
            .client
            .get(format!("{}/api/weather/{}", self.base_url, city))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received weather response");

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(WeatherError::Api(status));
        }

        Ok(response.json().await?)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        tracing::debug!(city = %city, "Fetching forecast series");

        let response = self
            .client
            .get(format!("{}/api/weather/forecast/{}", self.base_url, city))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api(status));
        }

        Ok(response.json().await?)
    }

    /// Post-fetch policy check: a 2xx response can still be rejected by
    /// country code.
    fn check_location_policy(country: &str) -> Result<(), WeatherError> {
        if BLOCKED_COUNTRIES.contains(&country) {
            return Err(WeatherError::BlockedLocation(country.to_string()));
        }
        Ok(())
    }

    fn normalize_current(raw: CurrentConditions) -> Result<WeatherSnapshot, WeatherError> {
        Self::check_location_policy(&raw.sys.country)?;

        let condition = raw
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingConditions)?;

        Ok(WeatherSnapshot {
            city: raw.name,
            country: raw.sys.country,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            description: condition.description,
            icon: condition.icon,
            humidity_pct: raw.main.humidity,
            wind_speed_kmh: display::wind_kmh(raw.wind.speed),
            pressure_hpa: raw.main.pressure,
            visibility_km: raw.visibility.map(display::visibility_km).unwrap_or_default(),
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
        })
    }

    /// Collapse the raw multi-entry series into at most one card per
    /// calendar day in the display timezone. The first entry of a day wins
    /// and output order is chronological first-seen.
    fn project_daily(series: ForecastSeries, tz: Tz) -> Vec<ForecastDay> {
        let mut seen: IndexSet<NaiveDate> = IndexSet::new();
        let mut days = Vec::new();

        for entry in series.list {
            if days.len() >= FORECAST_DAYS {
                break;
            }
            let Some(day) = display::local_day(entry.dt, tz) else {
                continue;
            };
            let Some(condition) = entry.weather.into_iter().next() else {
                continue;
            };
            if !seen.insert(day) {
                continue;
            }
            days.push(ForecastDay {
                date: entry.dt,
                temp_min_c: entry.main.temp_min,
                temp_max_c: entry.main.temp_max,
                icon: condition.icon,
                description: condition.description,
            });
        }

        days
    }
}

#[async_trait]
impl WeatherProvider for WeatherService {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let raw = self.fetch_current(city).await?;
        let snapshot = Self::normalize_current(raw)?;
        tracing::info!(
            city = %snapshot.city,
            temp = %snapshot.temperature_c,
            "Current conditions fetched"
        );
        Ok(snapshot)
    }

    async fn daily_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
        let series = self.fetch_forecast(city).await?;
        let days = Self::project_daily(series, self.display_tz);
        tracing::info!(count = days.len(), "Forecast strip built");
        Ok(days)
    }
}
