use crate::ml_client::MlClientError;
use crate::schemas::{ApiError, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{PredictionResult, Symbol};
use tracing::{debug, error, info, instrument, trace, warn};

/// Get the 5-day price prediction for a symbol
///
/// Answers with the bare array of predicted prices, day 1 first.
#[utoipa::path(
    get,
    path = "/api/stocks/{symbol}/predict",
    tag = "predictions",
    params(
        ("symbol" = String, Path, description = "Ticker symbol, case-insensitive"),
    ),
    responses(
        (status = 200, description = "Predicted prices in chronological order", body = Vec<f64>),
        (status = 400, description = "Empty symbol", body = ErrorResponse),
        (status = 404, description = "No prediction for the symbol", body = ErrorResponse),
        (status = 502, description = "ML service failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_predictions(
    Path(raw_symbol): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PredictionResult>, ApiError> {
    trace!("Entering get_predictions function");

    let symbol = Symbol::parse(&raw_symbol).map_err(|e| {
        warn!("Rejected symbol {:?}: {}", raw_symbol, e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_SYMBOL", e.to_string())),
        )
    })?;
    debug!("Normalized symbol {:?} to {}", raw_symbol, symbol);

    if let Some(cache) = &state.cache {
        if let Some(predictions) = cache.get(&symbol).await {
            debug!("Serving cached prediction for {}", symbol);
            return Ok(Json(predictions));
        }
    }

    let predictions = state.ml_client.predict(&symbol).await.map_err(|e| {
        match &e {
            MlClientError::NotFound(_) => {
                warn!("No prediction available for {}", symbol);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse::new("SYMBOL_NOT_FOUND", e.to_string())),
                )
            }
            _ => {
                error!("Prediction for {} failed: {}", symbol, e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::new("ML_SERVICE_ERROR", e.to_string())),
                )
            }
        }
    })?;

    if let Some(cache) = &state.cache {
        cache.insert(symbol.clone(), predictions.clone()).await;
    }

    info!("Prediction for {} served ({} days)", symbol, predictions.len());
    Ok(Json(predictions))
}
