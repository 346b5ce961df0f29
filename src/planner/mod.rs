mod models;
mod service;
mod view;

pub use models::{
    CheckWeatherRequest, CheckWeatherResponse, RawRecommendation, RecommendationResult,
    WeatherDetails,
};
pub use service::{PlannerError, PlannerService, RecommendationProvider};
pub use view::{CatalogState, PlannerPage, CATEGORY_ALL};
