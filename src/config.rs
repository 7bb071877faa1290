use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::Args;
use moka::future::Cache;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use crate::ml_client::MlClient;
use crate::schemas::AppState;

/// Floor for the route-wide request timeout
const MIN_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Head start the ML call gets over the route-wide timeout
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Gateway settings, read from flags or the environment (`.env` included)
#[derive(Args, Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address for the web server
    ///
    /// Format: IP:PORT (e.g., 0.0.0.0:8081, 127.0.0.1:8080)
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8081")]
    pub bind_address: String,

    /// Base URL of the ML prediction service
    #[arg(short, long, env = "ML_SERVICE_URL", default_value = "http://localhost:5000")]
    pub ml_service_url: String,

    /// Timeout for a single ML service call, in seconds
    #[arg(long, env = "ML_TIMEOUT_SECS", default_value_t = 25)]
    pub ml_timeout_secs: u64,

    /// How long a prediction is served from cache, in seconds. 0 disables caching.
    #[arg(long, env = "PREDICTION_CACHE_TTL_SECS", default_value_t = 300)]
    pub cache_ttl_secs: u64,

    /// Origin allowed to call the API (e.g. http://localhost:5173).
    /// Any origin is allowed when unset.
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

impl GatewayConfig {
    /// Deadline for a whole gateway request. Strictly longer than the ML call
    /// timeout so a hung ML service surfaces as an upstream error.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .ml_timeout_secs
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS)
            .max(MIN_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

/// Initialize application state from configuration
pub fn initialize_app_state(config: &GatewayConfig) -> Result<AppState> {
    let ml_client = MlClient::new(
        &config.ml_service_url,
        Duration::from_secs(config.ml_timeout_secs),
    )
    .context("failed to build ML service client")?;
    tracing::info!("Using ML service at {}", ml_client.base_url());

    let cache = build_cache(config.cache_ttl_secs);
    if cache.is_none() {
        tracing::info!("Prediction cache disabled");
    }

    Ok(AppState { ml_client, cache })
}

fn build_cache(ttl_secs: u64) -> Option<Cache<common::Symbol, common::PredictionResult>> {
    if ttl_secs == 0 {
        return None;
    }
    Some(
        Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build(),
    )
}

/// CORS policy for the browser frontend
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    match allowed_origin {
        None => Ok(CorsLayer::permissive()),
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("invalid ALLOWED_ORIGIN: {}", origin))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET])
                .allow_headers(Any))
        }
    }
}
