use common::{PredictionResult, ShapeError, Symbol};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

/// Errors talking to the ML service
#[derive(Debug, Error)]
pub enum MlClientError {
    #[error("ML service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("ML service has no model or data for {0}")]
    NotFound(Symbol),
    #[error("ML service answered with status {0}")]
    Upstream(StatusCode),
    #[error("ML service returned an unexpected body: {0}")]
    InvalidBody(String),
}

impl From<ShapeError> for MlClientError {
    fn from(e: ShapeError) -> Self {
        Self::InvalidBody(e.to_string())
    }
}

/// Request body of `POST /predict`
#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    symbol: &'a str,
}

/// Response body of `POST /predict`
#[derive(Debug, Deserialize)]
pub struct PredictionEnvelope {
    #[serde(default)]
    pub symbol: Option<String>,
    pub predictions: serde_json::Value,
}

/// Client for the service that computes predictions
#[derive(Debug, Clone)]
pub struct MlClient {
    http_client: HttpClient,
    base_url: String,
}

impl MlClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the ML service for the forecast of `symbol`
    pub async fn predict(&self, symbol: &Symbol) -> Result<PredictionResult, MlClientError> {
        let url = format!("{}/predict", self.base_url);
        debug!("POST {} for symbol {}", url, symbol);

        let response = self
            .http_client
            .post(&url)
            .json(&PredictionRequest {
                symbol: symbol.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!("ML service request for {} failed: {}", symbol, e);
                MlClientError::Unreachable(e)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("ML service has no prediction for {}", symbol);
            return Err(MlClientError::NotFound(symbol.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("ML service answered {} for {}: {}", status, symbol, body);
            return Err(MlClientError::Upstream(status));
        }

        trace!("ML response received for {}, decoding envelope", symbol);
        let body = response.text().await.map_err(|e| {
            error!("Failed to read ML response body for {}: {}", symbol, e);
            MlClientError::Unreachable(e)
        })?;
        let envelope: PredictionEnvelope = serde_json::from_str(&body).map_err(|e| {
            error!("ML response for {} is not a prediction envelope: {}", symbol, e);
            MlClientError::InvalidBody(e.to_string())
        })?;

        if let Some(answered) = envelope.symbol.as_deref() {
            if answered != symbol.as_str() {
                warn!("ML service answered for {} while {} was requested", answered, symbol);
            }
        }

        let predictions = PredictionResult::from_value(&envelope.predictions).map_err(|e| {
            error!("ML predictions for {} have the wrong shape: {}", symbol, e);
            MlClientError::from(e)
        })?;

        info!("Received {} predicted prices for {}", predictions.len(), symbol);
        Ok(predictions)
    }

    /// Whether the ML service answers its health probe
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("ML service health probe failed: {}", e);
                false
            }
        }
    }
}
