use super::models::{ForecastDay, WeatherSnapshot};
use super::service::{WeatherError, WeatherProvider};
use crate::display::Units;
use crate::error::UserFacing;

/// Fetch phase of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Handle for one in-flight load. A completed fetch is applied only while
/// its ticket is still the latest one issued; anything older is a stale
/// response for a city the user has since navigated away from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub city: String,
}

/// View-model of the weather dashboard page.
///
/// Owns all page state; no other component reads or writes it. Transitions
/// are split into `begin_load`/`apply` so orchestration (including request
/// interleavings) can be driven synchronously in tests.
#[derive(Debug)]
pub struct WeatherPage {
    city: String,
    pub search_input: String,
    pub units: Units,
    pub phase: LoadPhase,
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastDay>,
    pub error: Option<String>,
    generation: u64,
}

impl WeatherPage {
    pub fn new(default_city: &str) -> Self {
        Self {
            city: default_city.to_string(),
            search_input: String::new(),
            units: Units::Celsius,
            phase: LoadPhase::Idle,
            weather: None,
            forecast: Vec::new(),
            error: None,
            generation: 0,
        }
    }

    /// The most recently requested city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Enter the loading state and stamp a ticket for the in-flight fetch.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.error = None;
        LoadTicket {
            generation: self.generation,
            city: self.city.clone(),
        }
    }

    /// Apply a finished fetch. A ticket that is no longer the latest is
    /// discarded: the state slot belongs to the most recent request.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError>,
    ) {
        if ticket.generation != self.generation {
            tracing::debug!(city = %ticket.city, "Discarding stale weather response");
            return;
        }

        match outcome {
            Ok((snapshot, days)) => {
                self.weather = Some(snapshot);
                self.forecast = days;
                self.phase = LoadPhase::Loaded;
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Weather load failed");
                // Previously fetched data stays on screen next to the error
                self.error = Some(e.user_message());
                self.phase = LoadPhase::Failed;
            }
        }
    }

    /// One full load of the current city: current conditions first, then the
    /// 5-day strip. The two fetches populate disjoint state and could run
    /// concurrently; kept sequential to match the page flow.
    pub async fn load(&mut self, provider: &dyn WeatherProvider) {
        let ticket = self.begin_load();
        let outcome = Self::fetch(provider, &ticket.city).await;
        self.apply(ticket, outcome);
    }

    async fn fetch(
        provider: &dyn WeatherProvider,
        city: &str,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError> {
        let snapshot = provider.current(city).await?;
        let days = provider.daily_forecast(city).await?;
        Ok((snapshot, days))
    }

    /// Submit the search form. Blank input is ignored; otherwise the trimmed
    /// text becomes the requested city and the page reloads.
    pub async fn submit_search(&mut self, provider: &dyn WeatherProvider) {
        let requested = self.search_input.trim();
        if requested.is_empty() {
            return;
        }
        self.city = requested.to_string();
        self.load(provider).await;
    }

    pub fn set_search_input(&mut self, value: &str) {
        self.search_input = value.to_string();
    }

    /// °C/°F toggle; pure view state, stored temperatures stay Celsius.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            country: "FR".to_string(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            humidity_pct: 60,
            wind_speed_kmh: 10.8,
            pressure_hpa: 1013,
            visibility_km: 10.0,
            sunrise: 1_700_030_000,
            sunset: 1_700_065_000,
        }
    }

    fn day(dt: i64) -> ForecastDay {
        ForecastDay {
            date: dt,
            temp_min_c: 9.0,
            temp_max_c: 16.0,
            icon: "02d".to_string(),
            description: "few clouds".to_string(),
        }
    }

    /// Echoes the requested city back in the snapshot.
    struct OkProvider;

    #[async_trait]
    impl WeatherProvider for OkProvider {
        async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
            Ok(snapshot(city))
        }

        async fn daily_forecast(&self, _city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
            Ok(vec![day(1_700_035_200)])
        }
    }

    struct BlockedProvider;

    #[async_trait]
    impl WeatherProvider for BlockedProvider {
        async fn current(&self, _city: &str) -> Result<WeatherSnapshot, WeatherError> {
            Err(WeatherError::BlockedLocation("IL".to_string()))
        }

        async fn daily_forecast(&self, _city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
            Ok(vec![])
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        async fn current(&self, _city: &str) -> Result<WeatherSnapshot, WeatherError> {
            Err(WeatherError::Api(StatusCode::BAD_GATEWAY))
        }

        async fn daily_forecast(&self, _city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
            Err(WeatherError::Api(StatusCode::BAD_GATEWAY))
        }
    }

    #[tokio::test]
    async fn test_initial_load_populates_default_city() {
        let mut page = WeatherPage::new("Monastir");
        assert_eq!(page.phase, LoadPhase::Idle);

        page.load(&OkProvider).await;

        assert_eq!(page.phase, LoadPhase::Loaded);
        assert_eq!(page.weather.as_ref().unwrap().city, "Monastir");
        assert_eq!(page.forecast.len(), 1);
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn test_search_submits_trimmed_city() {
        let mut page = WeatherPage::new("Monastir");
        page.set_search_input("  Paris  ");

        page.submit_search(&OkProvider).await;

        assert_eq!(page.city(), "Paris");
        assert_eq!(page.weather.as_ref().unwrap().city, "Paris");
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let mut page = WeatherPage::new("Monastir");
        page.set_search_input("   ");

        page.submit_search(&FailingProvider).await;

        assert_eq!(page.phase, LoadPhase::Idle);
        assert_eq!(page.city(), "Monastir");
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn test_blocked_country_shows_policy_error_without_weather() {
        let mut page = WeatherPage::new("Tel Aviv");

        page.load(&BlockedProvider).await;

        assert_eq!(page.phase, LoadPhase::Failed);
        assert_eq!(
            page.error.as_deref(),
            Some("Cette localisation n'est pas disponible")
        );
        assert!(page.weather.is_none());
        assert!(page.forecast.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previously_loaded_data() {
        let mut page = WeatherPage::new("Monastir");
        page.load(&OkProvider).await;

        page.set_search_input("Lyon");
        page.submit_search(&FailingProvider).await;

        assert_eq!(page.phase, LoadPhase::Failed);
        assert_eq!(
            page.error.as_deref(),
            Some("Impossible de contacter le service météo")
        );
        // The last successful snapshot is still displayed next to the error
        assert_eq!(page.weather.as_ref().unwrap().city, "Monastir");
        assert_eq!(page.forecast.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut page = WeatherPage::new("Monastir");

        let first = page.begin_load();
        page.set_search_input("Paris");
        page.city = "Paris".to_string();
        let second = page.begin_load();

        // The older request resolves after the newer one was issued
        page.apply(first, Ok((snapshot("Monastir"), vec![])));
        assert!(page.weather.is_none(), "stale response must not land");

        page.apply(second, Ok((snapshot("Paris"), vec![day(1)])));
        assert_eq!(page.weather.as_ref().unwrap().city, "Paris");
        assert_eq!(page.phase, LoadPhase::Loaded);
    }

    #[tokio::test]
    async fn test_reload_clears_previous_error() {
        let mut page = WeatherPage::new("Monastir");
        page.load(&FailingProvider).await;
        assert!(page.error.is_some());

        page.load(&OkProvider).await;

        assert!(page.error.is_none());
        assert_eq!(page.phase, LoadPhase::Loaded);
    }
}
