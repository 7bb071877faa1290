use crate::PredictionResult;
use serde::Serialize;

/// Legend entry of the prediction series
pub const SERIES_NAME: &str = "Predicted Price";

/// One labeled point of the prediction chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Label for the forecast day at a 0-based position
pub fn day_label(index: usize) -> String {
    format!("Day {}", index + 1)
}

/// Map a prediction to chart points, one per day, in input order.
pub fn chart_points(result: &PredictionResult) -> Vec<ChartPoint> {
    result
        .values()
        .iter()
        .enumerate()
        .map(|(index, &value)| ChartPoint {
            label: day_label(index),
            value,
        })
        .collect()
}
