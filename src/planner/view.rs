use chrono::NaiveDate;

use super::models::{CheckWeatherRequest, RecommendationResult};
use super::service::RecommendationProvider;
use crate::activities::{catalog, Activity, ActivitySource};
use crate::error::UserFacing;

/// Shown when the first catalog fetch fails and the defaults take over.
const MSG_CATALOG_FALLBACK: &str =
    "Impossible de charger les activités depuis le serveur. Utilisation des activités par défaut.";

/// Shown when a retry fails; whatever catalog is loaded stays available.
const MSG_CATALOG_RETRY_FAILED: &str =
    "Impossible de se connecter au serveur. Les activités par défaut restent disponibles.";

/// Field-level validation message for an incomplete form.
const MSG_FIELDS_REQUIRED: &str = "Veuillez remplir tous les champs";

/// The single placeholder category. Category filtering is a documented
/// no-op: "all" never excludes anything, and no other value exists yet.
pub const CATEGORY_ALL: &str = "all";

/// Catalog slice of the planner page, with its own loading/error state so a
/// failed load stays recoverable without touching the form.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub activities: Vec<Activity>,
    pub loading: bool,
    pub error: Option<String>,
}

/// View-model of the activity planner page.
#[derive(Debug)]
pub struct PlannerPage {
    pub catalog: CatalogState,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub selected: Option<u32>,
    pub search_query: String,
    pub category: String,
    /// Gates the idle prompt panel vs. the results panel
    pub has_searched: bool,
    pub checking: bool,
    pub recommendation: Option<RecommendationResult>,
    pub error: Option<String>,
}

impl Default for PlannerPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerPage {
    pub fn new() -> Self {
        Self {
            catalog: CatalogState::default(),
            city: String::new(),
            date: None,
            selected: None,
            search_query: String::new(),
            category: CATEGORY_ALL.to_string(),
            has_searched: false,
            checking: false,
            recommendation: None,
            error: None,
        }
    }

    /// Initial catalog load. Failure is recoverable: the default catalog
    /// replaces the working one wholesale and the page stays usable.
    pub async fn load_catalog(&mut self, source: &dyn ActivitySource) {
        self.catalog.loading = true;
        self.catalog.error = None;

        match source.activities().await {
            Ok(activities) => {
                self.catalog.activities = activities;
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Catalog load failed, applying defaults");
                self.catalog.error = Some(MSG_CATALOG_FALLBACK.to_string());
                self.catalog.activities = catalog::default_catalog();
            }
        }

        self.catalog.loading = false;
    }

    /// Re-run the catalog fetch. Renewed success replaces the fallback;
    /// renewed failure keeps whatever catalog is already present.
    pub async fn retry_catalog(&mut self, source: &dyn ActivitySource) {
        self.catalog.loading = true;
        self.catalog.error = None;

        match source.activities().await {
            Ok(activities) => {
                self.catalog.activities = activities;
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Catalog retry failed");
                self.catalog.error = Some(MSG_CATALOG_RETRY_FAILED.to_string());
                if self.catalog.activities.is_empty() {
                    self.catalog.activities = catalog::default_catalog();
                }
            }
        }

        self.catalog.loading = false;
    }

    pub fn set_city(&mut self, city: &str) {
        self.city = city.to_string();
        self.error = None;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.error = None;
    }

    /// Search field edits. Clearing the field fully deselects the current
    /// activity; any other text never changes the selection.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
        if query.is_empty() && self.selected.is_some() {
            self.selected = None;
        }
    }

    /// Card click: single-select, and the search field mirrors the selected
    /// title (one-way sync, selection to text).
    pub fn select_activity(&mut self, id: u32) {
        let Some(activity) = self.catalog.activities.iter().find(|a| a.id == id) else {
            tracing::debug!(id, "Ignoring selection of unknown activity");
            return;
        };
        self.search_query = activity.title.clone();
        self.selected = Some(id);
        self.error = None;
    }

    pub fn selected_activity(&self) -> Option<&Activity> {
        self.selected
            .and_then(|id| self.catalog.activities.iter().find(|a| a.id == id))
    }

    /// Case-insensitive title substring filter. The category leg only
    /// passes "all", which is the only category there is.
    pub fn filtered_activities(&self) -> Vec<&Activity> {
        let needle = self.search_query.to_lowercase();
        self.catalog
            .activities
            .iter()
            .filter(|a| a.title.to_lowercase().contains(&needle))
            .filter(|_| self.category == CATEGORY_ALL)
            .collect()
    }

    /// The check button is enabled only with a complete form and a settled,
    /// non-empty catalog.
    pub fn can_check(&self) -> bool {
        !self.checking
            && !self.catalog.loading
            && !self.catalog.activities.is_empty()
            && self.selected.is_some()
            && !self.city.trim().is_empty()
            && self.date.is_some()
    }

    /// Run one weather-fit check. The response is normalized however partial
    /// it is; a failed request surfaces an error and withholds a new
    /// recommendation while keeping any previous one.
    pub async fn check_weather(&mut self, provider: &dyn RecommendationProvider) {
        let city = self.city.trim().to_string();
        let (Some(date), Some(activity_id)) = (self.date, self.selected) else {
            self.error = Some(MSG_FIELDS_REQUIRED.to_string());
            return;
        };
        if city.is_empty() {
            self.error = Some(MSG_FIELDS_REQUIRED.to_string());
            return;
        }

        self.checking = true;
        self.error = None;
        self.has_searched = true;

        let request = CheckWeatherRequest {
            city,
            date,
            activity_id,
        };
        match provider.check_weather(&request).await {
            Ok(result) => {
                tracing::info!(score = result.score, "Weather fit checked");
                self.recommendation = Some(result);
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Weather fit check failed");
                self.error = Some(e.user_message());
            }
        }

        self.checking = false;
    }

    /// Back to a blank form and the idle prompt panel.
    pub fn reset(&mut self) {
        self.city.clear();
        self.date = None;
        self.selected = None;
        self.recommendation = None;
        self.error = None;
        self.search_query.clear();
        self.category = CATEGORY_ALL.to_string();
        self.has_searched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::CatalogError;
    use crate::display;
    use crate::planner::models::CheckWeatherResponse;
    use crate::planner::service::PlannerError;
    use async_trait::async_trait;
    use chrono::{Days, Utc};
    use reqwest::StatusCode;

    struct RemoteCatalog(Vec<(&'static str, &'static str)>);

    #[async_trait]
    impl ActivitySource for RemoteCatalog {
        async fn activities(&self) -> Result<Vec<Activity>, CatalogError> {
            let raw = self
                .0
                .iter()
                .map(|(title, tag)| crate::activities::RawActivity {
                    title: title.to_string(),
                    icon: "🎯".to_string(),
                    tags: vec![tag.to_string()],
                })
                .collect();
            Ok(catalog::normalize(raw))
        }
    }

    struct UnreachableCatalog;

    #[async_trait]
    impl ActivitySource for UnreachableCatalog {
        async fn activities(&self) -> Result<Vec<Activity>, CatalogError> {
            Err(CatalogError::Api(StatusCode::SERVICE_UNAVAILABLE))
        }
    }

    /// Parses a canned JSON body through the real normalization path.
    struct CannedProvider(&'static str);

    #[async_trait]
    impl RecommendationProvider for CannedProvider {
        async fn check_weather(
            &self,
            _request: &CheckWeatherRequest,
        ) -> Result<RecommendationResult, PlannerError> {
            let body: CheckWeatherResponse = serde_json::from_str(self.0).unwrap();
            Ok(RecommendationResult::from_response(body))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RecommendationProvider for FailingProvider {
        async fn check_weather(
            &self,
            _request: &CheckWeatherRequest,
        ) -> Result<RecommendationResult, PlannerError> {
            Err(PlannerError::Api(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    async fn page_with_defaults() -> PlannerPage {
        let mut page = PlannerPage::new();
        page.load_catalog(&UnreachableCatalog).await;
        page
    }

    fn tomorrow() -> NaiveDate {
        Utc::now().date_naive() + Days::new(1)
    }

    #[tokio::test]
    async fn test_catalog_load_success() {
        let mut page = PlannerPage::new();
        page.load_catalog(&RemoteCatalog(vec![("Escalade", "outdoor")])).await;

        assert!(page.catalog.error.is_none());
        assert!(!page.catalog.loading);
        assert_eq!(page.catalog.activities.len(), 1);
        assert_eq!(page.catalog.activities[0].id, 1);
    }

    #[tokio::test]
    async fn test_catalog_failure_applies_default_catalog() {
        let page = page_with_defaults().await;

        assert_eq!(page.catalog.error.as_deref(), Some(MSG_CATALOG_FALLBACK));
        assert_eq!(page.catalog.activities.len(), 5);
        assert_eq!(page.catalog.activities[0].title, "🎯 Randonnée");
    }

    #[tokio::test]
    async fn test_retry_success_replaces_fallback() {
        let mut page = page_with_defaults().await;

        page.retry_catalog(&RemoteCatalog(vec![("Escalade", "outdoor"), ("Voile", "wind-sensitive")]))
            .await;

        assert!(page.catalog.error.is_none());
        assert_eq!(page.catalog.activities.len(), 2);
        assert_eq!(page.catalog.activities[0].title, "Escalade");
    }

    #[tokio::test]
    async fn test_retry_failure_preserves_current_catalog() {
        let mut page = PlannerPage::new();
        page.load_catalog(&RemoteCatalog(vec![("Escalade", "outdoor")])).await;

        page.retry_catalog(&UnreachableCatalog).await;

        assert_eq!(page.catalog.error.as_deref(), Some(MSG_CATALOG_RETRY_FAILED));
        // The previously fetched catalog is not cleared
        assert_eq!(page.catalog.activities.len(), 1);
        assert_eq!(page.catalog.activities[0].title, "Escalade");
    }

    #[tokio::test]
    async fn test_select_activity_mirrors_title_into_search() {
        let mut page = page_with_defaults().await;

        page.select_activity(2);

        assert_eq!(page.selected, Some(2));
        assert_eq!(page.search_query, "🚴 Cyclisme");
        assert_eq!(page.selected_activity().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_clearing_search_deselects() {
        let mut page = page_with_defaults().await;
        page.select_activity(1);

        page.set_search_query("");

        assert_eq!(page.selected, None);
        assert_eq!(page.selected_activity(), None);
    }

    #[tokio::test]
    async fn test_partial_search_keeps_selection() {
        let mut page = page_with_defaults().await;
        page.select_activity(1);

        page.set_search_query("Rand");

        assert_eq!(page.selected, Some(1));
    }

    #[tokio::test]
    async fn test_filtering_is_case_insensitive_substring() {
        let mut page = page_with_defaults().await;

        page.set_search_query("cyc");
        let titles: Vec<&str> = page
            .filtered_activities()
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["🚴 Cyclisme"]);

        page.set_search_query("zzz");
        assert!(page.filtered_activities().is_empty());

        page.set_search_query("");
        assert_eq!(page.filtered_activities().len(), 5);
    }

    #[tokio::test]
    async fn test_can_check_requires_complete_form() {
        let mut page = page_with_defaults().await;
        assert!(!page.can_check());

        page.set_city("Paris");
        assert!(!page.can_check());

        page.set_date(tomorrow());
        assert!(!page.can_check());

        page.select_activity(1);
        assert!(page.can_check());

        page.set_city("   ");
        assert!(!page.can_check());
    }

    #[tokio::test]
    async fn test_check_with_missing_fields_sets_validation_error() {
        let mut page = page_with_defaults().await;
        page.set_city("Paris");

        page.check_weather(&FailingProvider).await;

        assert_eq!(page.error.as_deref(), Some(MSG_FIELDS_REQUIRED));
        assert!(!page.has_searched, "validation failure is not a search");
        assert!(page.recommendation.is_none());
    }

    #[tokio::test]
    async fn test_check_failure_keeps_previous_recommendation() {
        let mut page = page_with_defaults().await;
        page.set_city("Paris");
        page.set_date(tomorrow());
        page.select_activity(1);

        page.check_weather(&CannedProvider(r#"{"recommendation": {"score": 55}}"#))
            .await;
        assert_eq!(page.recommendation.as_ref().unwrap().score, 55);

        page.check_weather(&FailingProvider).await;

        assert_eq!(page.error.as_deref(), Some("Erreur HTTP: 500"));
        // The earlier result stays; only a new one is withheld
        assert_eq!(page.recommendation.as_ref().unwrap().score, 55);
        assert!(page.has_searched);
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_prompt() {
        let mut page = page_with_defaults().await;
        page.set_city("Paris");
        page.set_date(tomorrow());
        page.select_activity(3);
        page.check_weather(&CannedProvider("{}")).await;
        assert!(page.has_searched);

        page.reset();

        assert_eq!(page.city, "");
        assert_eq!(page.date, None);
        assert_eq!(page.selected, None);
        assert_eq!(page.search_query, "");
        assert_eq!(page.category, CATEGORY_ALL);
        assert!(page.recommendation.is_none());
        assert!(page.error.is_none());
        assert!(!page.has_searched);
    }

    #[tokio::test]
    async fn test_check_weather_end_to_end_display() {
        let mut page = page_with_defaults().await;
        page.set_city("Paris");
        page.set_date(tomorrow());
        page.select_activity(1);
        assert!(page.can_check());

        page.check_weather(&CannedProvider(
            r#"{"recommendation": {
                "score": 75,
                "recommendation": "Favorable",
                "details": {
                    "temperature": 18,
                    "conditions": "clear sky",
                    "humidity": 60,
                    "windSpeed": 3,
                    "uvIndex": 4
                }
            }}"#,
        ))
        .await;

        assert!(page.has_searched);
        let result = page.recommendation.as_ref().unwrap();

        assert_eq!(format!("{}%", result.score), "75%");
        assert_eq!(display::status_text(result.score), "Bon");
        assert_eq!(display::status_class(result.score), "status-good");
        assert_eq!(result.text, "Favorable");
        assert_eq!(
            display::format_wind_precise(result.details.wind_speed.unwrap()),
            "10.8 km/h"
        );
        assert_eq!(
            display::condition_label(result.details.conditions.as_deref().unwrap()),
            "Ciel dégagé"
        );
    }
}
