mod prediction_chart;
mod predictor;
mod symbol_input;

pub use predictor::Predictor;
