//! Pure display transformations: unit conversions, localized label tables,
//! and timestamp formatting.
//!
//! Everything here is a total function with no side effects. Table lookups
//! fall back to the raw input (labels) or a fixed default (icons, classes);
//! an unknown key is not an error.

use std::str::FromStr;

use chrono::{DateTime, Locale, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Temperature units selected by the dashboard toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "celsius" | "metric" => Ok(Units::Celsius),
            "fahrenheit" | "imperial" => Ok(Units::Fahrenheit),
            other => Err(format!("unknown units: {other}")),
        }
    }
}

/// Celsius passthrough, or Celsius to Fahrenheit via `round(c*9/5+32)`.
///
/// Stored values stay in Celsius everywhere; conversion and rounding apply
/// to the displayed value only. `f64::round` rounds half away from zero.
pub fn convert_temp(celsius: f64, units: Units) -> f64 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => (celsius * 9.0 / 5.0 + 32.0).round(),
    }
}

/// Whole-degree display string, e.g. "18°C".
pub fn format_temp(celsius: f64, units: Units) -> String {
    format!("{}{}", convert_temp(celsius, units).round() as i64, units.suffix())
}

/// Wind speeds arrive in m/s from the source API and display in km/h.
pub fn wind_kmh(meters_per_second: f64) -> f64 {
    meters_per_second * 3.6
}

/// Dashboard stat tile: integer km/h.
pub fn format_wind(kmh: f64) -> String {
    format!("{} km/h", kmh.round() as i64)
}

/// Planner detail line: one decimal from the raw m/s reading, e.g. "10.8 km/h".
pub fn format_wind_precise(meters_per_second: f64) -> String {
    format!("{:.1} km/h", wind_kmh(meters_per_second))
}

/// Visibility arrives in meters and displays in km.
pub fn visibility_km(meters: u32) -> f64 {
    f64::from(meters) / 1000.0
}

/// "HH:MM" clock in the display timezone, used for sunrise/sunset.
pub fn format_clock(epoch: i64, tz: Tz) -> String {
    match tz.timestamp_opt(epoch, 0).single() {
        Some(moment) => moment.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Abbreviated French weekday for a forecast card, e.g. "mar.".
pub fn format_weekday(epoch: i64, tz: Tz) -> String {
    match tz.timestamp_opt(epoch, 0).single() {
        Some(moment) => moment.format_localized("%a", Locale::fr_FR).to_string(),
        None => String::new(),
    }
}

/// Long French date heading, e.g. "mardi 14 novembre 2023".
pub fn format_full_date(moment: DateTime<Utc>, tz: Tz) -> String {
    moment
        .with_timezone(&tz)
        .format_localized("%A %-d %B %Y", Locale::fr_FR)
        .to_string()
}

/// Calendar day of an epoch timestamp in the display timezone. The forecast
/// strip groups entries by this value.
pub fn local_day(epoch: i64, tz: Tz) -> Option<NaiveDate> {
    tz.timestamp_opt(epoch, 0).single().map(|moment| moment.date_naive())
}

/// Weather tag identifier to French display label.
pub fn tag_label(tag: &str) -> &str {
    match tag {
        "outdoor" => "extérieur",
        "indoor" => "intérieur",
        "sun-critical" => "ensoleillement critique",
        "wind-sensitive" => "sensible au vent",
        "rain-prohibited" => "pluie interdite",
        "temp-min" => "température minimale",
        "temp-max" => "température maximale",
        other => other,
    }
}

/// OpenWeather condition string to French label. Lookup is case-insensitive;
/// an unknown condition displays as-is.
pub fn condition_label(condition: &str) -> &str {
    match condition.to_ascii_lowercase().as_str() {
        "clear sky" => "Ciel dégagé",
        "few clouds" => "Quelques nuages",
        "scattered clouds" => "Nuages épars",
        "broken clouds" => "Nuages fragmentés",
        "overcast clouds" => "Ciel couvert",
        "mist" => "Brume",
        "fog" => "Brouillard",
        "light rain" => "Pluie légère",
        "moderate rain" => "Pluie modérée",
        "heavy rain" => "Forte pluie",
        "thunderstorm" => "Orage",
        "snow" => "Neige",
        "shower rain" => "Averses",
        "rain" => "Pluie",
        "drizzle" => "Bruine",
        _ => condition,
    }
}

pub fn tag_icon(tag: &str) -> &'static str {
    match tag {
        "outdoor" => "🌳",
        "indoor" => "🏠",
        "sun-critical" => "☀️",
        "wind-sensitive" => "💨",
        "rain-prohibited" => "🌧️",
        "temp-min" => "🌡️↓",
        "temp-max" => "🌡️↑",
        _ => "🔹",
    }
}

pub fn tag_class(tag: &str) -> &'static str {
    match tag {
        "outdoor" => "tag-outdoor",
        "indoor" => "tag-indoor",
        "sun-critical" => "tag-sun",
        "wind-sensitive" => "tag-wind",
        "rain-prohibited" => "tag-rain",
        "temp-min" | "temp-max" => "tag-temp",
        _ => "tag-default",
    }
}

/// Status label for a recommendation score.
pub fn status_text(score: u8) -> &'static str {
    if score >= 80 {
        "Parfait"
    } else if score >= 60 {
        "Bon"
    } else if score >= 40 {
        "Défavorable"
    } else {
        "Critique"
    }
}

pub fn status_class(score: u8) -> &'static str {
    if score >= 80 {
        "status-perfect"
    } else if score >= 60 {
        "status-good"
    } else if score >= 40 {
        "status-warning"
    } else {
        "status-danger"
    }
}

pub fn recommendation_class(score: u8) -> &'static str {
    if score >= 80 {
        "recommendation-perfect"
    } else if score >= 60 {
        "recommendation-good"
    } else if score >= 40 {
        "recommendation-warning"
    } else {
        "recommendation-danger"
    }
}

/// Page theme class driven by the current temperature; no data reads as cold.
pub fn theme_class(temperature_c: Option<f64>) -> &'static str {
    let Some(temp) = temperature_c else {
        return "weather-cold";
    };
    if temp < 0.0 {
        "weather-freezing"
    } else if temp < 10.0 {
        "weather-cold"
    } else if temp < 20.0 {
        "weather-cool"
    } else if temp < 30.0 {
        "weather-warm"
    } else {
        "weather-hot"
    }
}

/// Rendered size of an OpenWeather icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Forecast card (@2x)
    Card,
    /// Main dashboard card (@4x)
    Hero,
}

impl IconSize {
    fn scale(self) -> &'static str {
        match self {
            IconSize::Card => "2x",
            IconSize::Hero => "4x",
        }
    }
}

/// Icons are referenced by URL only; nothing here fetches them.
pub fn icon_url(icon: &str, size: IconSize) -> String {
    format!("{}/{}@{}.png", ICON_BASE_URL, icon, size.scale())
}
