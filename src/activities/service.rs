use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::catalog;
use super::models::{Activity, RawActivity};
use crate::error::{ErrorKind, UserFacing};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch activities: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Activity service returned HTTP {0}")]
    Api(StatusCode),
}

impl UserFacing for CatalogError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Network
    }
}

/// Fetch seam for the activity catalog.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch the remote catalog and normalize it.
    async fn activities(&self) -> Result<Vec<Activity>, CatalogError>;
}

pub struct ActivityService {
    client: Client,
    base_url: String,
}

impl ActivityService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ActivitySource for ActivityService {
    async fn activities(&self) -> Result<Vec<Activity>, CatalogError> {
        tracing::debug!("Fetching activity catalog");

        let response = self
            .client
            .get(format!("{}/api/activities", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api(status));
        }

        let raw: Vec<RawActivity> = response.json().await?;
        let activities = catalog::normalize(raw);
        tracing::info!(count = activities.len(), "Activity catalog fetched");
        Ok(activities)
    }
}
