use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the weather/task service
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Base URL of the activity catalog service
    #[serde(default = "default_activities_api_url")]
    pub activities_api_url: String,

    /// City loaded when the dashboard first mounts
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Temperature units: celsius or fahrenheit
    #[serde(default = "default_units")]
    pub units: String,

    /// IANA timezone used to render timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_weather_api_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_activities_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_city() -> String {
    "Monastir".to_string()
}

fn default_units() -> String {
    "celsius".to_string()
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("weather_api_url", default_weather_api_url())?
            .set_default("activities_api_url", default_activities_api_url())?
            .set_default("default_city", default_city())?
            .set_default("units", default_units())?
            .set_default("timezone", default_timezone())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with METEOFIT_)
            // Convert SCREAMING_SNAKE_CASE env vars to snake_case config keys
            .add_source(
                Environment::with_prefix("METEOFIT")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
