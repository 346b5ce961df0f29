use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use reqwest::Client;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meteofit::activities::ActivityService;
use meteofit::config::AppConfig;
use meteofit::display::{self, IconSize, Units};
use meteofit::planner::PlannerPage;
use meteofit::weather::{WeatherPage, WeatherService};

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Create shared HTTP client with connection pooling
fn create_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meteofit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    let tz: Tz = config
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid display timezone {:?}: {}", config.timezone, e))?;
    let units: Units = config.units.parse().map_err(anyhow::Error::msg)?;

    // Shared HTTP client across both services
    let http_client = create_http_client();
    let weather_service = WeatherService::new(http_client.clone(), &config.weather_api_url, tz);
    let activity_service = ActivityService::new(http_client, &config.activities_api_url);

    // One dashboard snapshot for the configured default city
    let mut dashboard = WeatherPage::new(&config.default_city);
    dashboard.set_units(units);
    dashboard.load(&weather_service).await;
    print_dashboard(&dashboard, tz);

    // Activity catalog as the planner page would show it
    let mut planner = PlannerPage::new();
    planner.load_catalog(&activity_service).await;
    print_catalog(&planner);

    Ok(())
}

fn print_dashboard(page: &WeatherPage, tz: Tz) {
    if let Some(message) = &page.error {
        println!("⚠️  {message}");
    }

    let Some(weather) = &page.weather else {
        return;
    };
    let units = page.units;

    println!("{}, {}", weather.city, weather.country);
    println!("{}", display::format_full_date(Utc::now(), tz));
    println!(
        "{} (ressenti {})  {}",
        display::format_temp(weather.temperature_c, units),
        display::format_temp(weather.feels_like_c, units),
        display::condition_label(&weather.description),
    );
    println!("{}", display::icon_url(&weather.icon, IconSize::Hero));
    println!("💧 Humidité   {}%", weather.humidity_pct);
    println!("💨 Vent       {}", display::format_wind(weather.wind_speed_kmh));
    println!("🌅 Lever      {}", display::format_clock(weather.sunrise, tz));
    println!("🌇 Coucher    {}", display::format_clock(weather.sunset, tz));
    println!("Pression atmosphérique: {} hPa", weather.pressure_hpa);
    println!("Visibilité: {} km", weather.visibility_km);

    if !page.forecast.is_empty() {
        println!("\nPrévisions sur 5 jours");
        for (index, day) in page.forecast.iter().enumerate() {
            let label = if index == 0 {
                "Aujourd'hui".to_string()
            } else {
                display::format_weekday(day.date, tz)
            };
            println!(
                "  {:<12} {} / {}  {}",
                label,
                display::format_temp(day.temp_max_c, units),
                display::format_temp(day.temp_min_c, units),
                display::condition_label(&day.description),
            );
        }
    }
}

fn print_catalog(planner: &PlannerPage) {
    if let Some(message) = &planner.catalog.error {
        println!("\n⚠️  {message}");
    }

    println!("\nActivités disponibles");
    for activity in &planner.catalog.activities {
        let tags = activity
            .weather_tags
            .iter()
            .map(|tag| format!("{} {}", display::tag_icon(tag), display::tag_label(tag)))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:>2}. {}  [{}]", activity.id, activity.title, tags);
    }
}
