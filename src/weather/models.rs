use serde::Deserialize;

// ============================================================================
// Raw wire payloads (OpenWeather-shaped, deserialized as received)
// ============================================================================

/// Payload of `GET /api/weather/{city}`.
#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: SysInfo,
    pub main: MainReadings,
    pub weather: Vec<ConditionInfo>,
    pub wind: WindInfo,
    pub visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SysInfo {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConditionInfo {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct WindInfo {
    /// m/s from the source API
    pub speed: f64,
}

/// Payload of `GET /api/weather/forecast/{city}`.
#[derive(Debug, Deserialize)]
pub struct ForecastSeries {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastReadings,
    pub weather: Vec<ConditionInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastReadings {
    pub temp_min: f64,
    pub temp_max: f64,
}

// ============================================================================
// Normalized dashboard state
// ============================================================================

/// Current conditions as the dashboard owns them. Built wholesale per
/// successful fetch and replaced, never patched. Temperatures stay in
/// Celsius; the °C/°F toggle converts at display time only.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u32,
    pub wind_speed_kmh: f64,
    pub pressure_hpa: u32,
    pub visibility_km: f64,
    pub sunrise: i64,
    pub sunset: i64,
}

/// One card of the 5-day strip: the first forecast entry seen for each
/// calendar day, in chronological first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: i64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub icon: String,
    pub description: String,
}
