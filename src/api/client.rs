use reqwest::Client;
use std::time::Duration;

use crate::api::models::{AllSensors, RoomQuery, RoomSnapshot};
use crate::config::Config;
use crate::error::{AppError, AppResult};

pub struct SensorApiClient {
    http_client: Client,
    base_url: String,
}

impl SensorApiClient {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: config.api_base_url.clone(),
        }
    }

    /// Get the latest readings for every room.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SensorApi` if the request fails or returns an error status.
    pub async fn get_all_sensors(&self) -> AppResult<AllSensors> {
        let url = format!("{}/sensors", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SensorApi(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::SensorApi(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SensorApi(format!("Failed to parse response: {e}")))
    }

    /// Get readings for one room, optionally filtered by sensor, type, field,
    /// or time range.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SensorApi` if the request fails or returns an error status.
    pub async fn get_room_sensors(
        &self,
        room_id: &str,
        query: &RoomQuery,
    ) -> AppResult<RoomSnapshot> {
        // Build the URL manually so unset filters are omitted entirely
        let query_string = query.to_query_string();
        let url = if query_string.is_empty() {
            format!("{}/sensors/{}", self.base_url, room_id)
        } else {
            format!("{}/sensors/{}?{}", self.base_url, room_id, query_string)
        };

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SensorApi(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::SensorApi(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::SensorApi(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                room_id,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse room sensors response"
            );
            AppError::SensorApi(format!("Failed to parse response: {e}"))
        })
    }

    /// Get the sensor-type catalog. The payload shape is backend-defined, so
    /// it is kept as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SensorApi` if the request fails or returns an error status.
    pub async fn get_sensor_types(&self) -> AppResult<serde_json::Value> {
        let url = format!("{}/sensors_types", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SensorApi(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::SensorApi(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SensorApi(format!("Failed to parse response: {e}")))
    }
}
