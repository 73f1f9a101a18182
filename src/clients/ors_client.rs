//! Cliente de la Matrix API de OpenRouteService
//!
//! Una llamada POST a /v2/matrix/driving-car con origen y destino;
//! la respuesta trae la distancia en metros.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::RoutingProvider;
use crate::models::Coordinates;
use crate::utils::errors::RoutingError;

const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

#[derive(Debug, Deserialize)]
struct OrsMatrixResponse {
    #[serde(default)]
    error: Option<OrsError>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct OrsError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Cliente HTTP de OpenRouteService
pub struct OrsMatrixClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OrsMatrixClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, RoutingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoutingError::Transport(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: ORS_BASE_URL.to_string(),
            client,
        })
    }

    /// Apuntar a otra URL base (para tests o un despliegue self-hosted)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl RoutingProvider for OrsMatrixClient {
    async fn distance_km(
        &self,
        origin: Coordinates,
        dest: Coordinates,
    ) -> Result<f64, RoutingError> {
        let url = format!("{}/v2/matrix/driving-car", self.base_url);

        // ORS espera las coordenadas en orden [lng, lat]
        let payload = json!({
            "locations": [
                [origin.lng, origin.lat],
                [dest.lng, dest.lat]
            ],
            "sources": [0],
            "destinations": [1],
            "metrics": ["distance"]
        });

        log::debug!(
            "🌐 ORS matrix request: ({}, {}) -> ({}, {})",
            origin.lat,
            origin.lng,
            dest.lat,
            dest.lng
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ ORS respondió {}: {}", status, body);
            return Err(RoutingError::Api(format!("status {}", status)));
        }

        let matrix: OrsMatrixResponse = response
            .json()
            .await
            .map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

        if let Some(error) = matrix.error {
            let message = error.message.unwrap_or_else(|| "unknown error".to_string());
            log::error!("❌ ORS API error {:?}: {}", error.code, message);
            return Err(RoutingError::Api(message));
        }

        let distance_meters = matrix
            .distances
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.first())
            .copied()
            .flatten()
            .ok_or_else(|| {
                RoutingError::InvalidResponse("no distance in matrix response".to_string())
            })?;

        Ok(distance_meters / 1000.0)
    }
}
