use crate::ml_client::MlClient;
use axum::{http::StatusCode, response::Json};
use common::{PredictionResult, Symbol};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the ML service
    pub ml_client: MlClient,
    /// Recent predictions by symbol; `None` when caching is disabled
    pub cache: Option<Cache<Symbol, PredictionResult>>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Rejection used by handlers: status plus JSON error body
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// ML service reachability
    pub ml_service: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::predictions::get_predictions,
    ),
    components(schemas(ErrorResponse, HealthResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "predictions", description = "Stock price prediction endpoints"),
    ),
    info(
        title = "Stock Predictor API",
        description = "Gateway between the stock predictor frontend and the ML prediction service",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
