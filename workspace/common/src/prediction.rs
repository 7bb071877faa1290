use crate::Symbol;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Forecast prices in chronological order, day 1 first.
///
/// Serializes as a bare JSON array, which is exactly what the gateway sends
/// to the browser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult(Vec<f64>);

/// Why a response body could not be accepted as a [`PredictionResult`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON array of prices, got {0}")]
    NotAnArray(&'static str),
    #[error("element {index} is not a number")]
    NonNumeric { index: usize },
}

impl PredictionResult {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a raw response body, requiring a bare array of numbers.
    pub fn from_json(body: &str) -> Result<Self, ShapeError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ShapeError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Check an already-decoded JSON value against the expected shape.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(_) => return Err(ShapeError::NotAnArray("an object")),
            Value::Null => return Err(ShapeError::NotAnArray("null")),
            Value::Bool(_) => return Err(ShapeError::NotAnArray("a boolean")),
            Value::Number(_) => return Err(ShapeError::NotAnArray("a number")),
            Value::String(_) => return Err(ShapeError::NotAnArray("a string")),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| item.as_f64().ok_or(ShapeError::NonNumeric { index }))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<f64>> for PredictionResult {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// The single failure signal for prediction retrieval.
///
/// Transport errors, non-success statuses and malformed bodies all end up
/// here; the underlying cause is logged where it happens and not carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch prediction for {symbol}")]
pub struct FetchFailure {
    pub symbol: Symbol,
}

impl FetchFailure {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}
