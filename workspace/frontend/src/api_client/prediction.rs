use common::{FetchFailure, PredictionResult, Symbol};
use crate::api_client;

/// Endpoint of the prediction for `symbol`, relative to the API base
pub fn prediction_endpoint(symbol: &Symbol) -> String {
    format!("/{}/predict", symbol)
}

/// Fetch the forecast for `symbol`.
///
/// Anything other than a 2xx response carrying a bare array of numbers is
/// reported as a [`FetchFailure`].
pub async fn fetch_prediction(symbol: &Symbol) -> Result<PredictionResult, FetchFailure> {
    log::trace!("Fetching prediction for {}", symbol);

    let body = api_client::get_text(&prediction_endpoint(symbol))
        .await
        .map_err(|e| {
            log::error!("Failed to fetch prediction for {}: {}", symbol, e);
            FetchFailure::new(symbol.clone())
        })?;

    let result = PredictionResult::from_json(&body).map_err(|e| {
        log::error!("Prediction for {} has an unexpected shape: {}", symbol, e);
        FetchFailure::new(symbol.clone())
    })?;

    log::info!("Fetched {} predicted prices for {}", result.len(), symbol);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_interpolates_normalized_symbol() {
        let symbol = Symbol::parse("aapl ").unwrap();
        assert_eq!(prediction_endpoint(&symbol), "/AAPL/predict");
    }
}
