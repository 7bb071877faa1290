pub mod loading;
pub mod notify;
pub mod prediction_provider;
