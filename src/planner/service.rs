use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::{CheckWeatherRequest, CheckWeatherResponse, RecommendationResult};
use crate::error::{ErrorKind, UserFacing};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Failed to check weather fit: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Task service returned HTTP {0}")]
    Api(StatusCode),
}

impl UserFacing for PlannerError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Network
    }

    fn user_message(&self) -> String {
        match self {
            Self::Api(status) => format!("Erreur HTTP: {}", status.as_u16()),
            Self::Request(_) => "Erreur inconnue lors de la vérification météo".to_string(),
        }
    }
}

/// Fetch seam for the weather-fit check.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn check_weather(
        &self,
        request: &CheckWeatherRequest,
    ) -> Result<RecommendationResult, PlannerError>;
}

pub struct PlannerService {
    client: Client,
    base_url: String,
}

impl PlannerService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecommendationProvider for PlannerService {
    async fn check_weather(
        &self,
        request: &CheckWeatherRequest,
    ) -> Result<RecommendationResult, PlannerError> {
        tracing::debug!(
            city = %request.city,
            date = %request.date,
            activity_id = request.activity_id,
            "Checking weather fit"
        );

        let response = self
            .client
            .post(format!("{}/api/tasks/check-weather", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received weather fit response");

        if !status.is_success() {
            return Err(PlannerError::Api(status));
        }

        // A 2xx with an empty or malformed body degrades to the default
        // record instead of failing the check
        let body: CheckWeatherResponse = response.json().await.unwrap_or_default();
        Ok(RecommendationResult::from_response(body))
    }
}
