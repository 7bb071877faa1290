use yew::prelude::*;

mod components;
pub mod api_client;
pub mod hooks;
pub mod settings;
pub mod ui;

use components::Predictor;
use ui::prediction_provider::PredictionProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <PredictionProvider>
            <div class="text-center p-10">
                <h1 class="text-3xl font-bold text-gray-800">
                    {"📊 Stock Price Predictor"}
                </h1>
                <p class="text-gray-500 mt-2">
                    {"Predict next 5 days of stock prices using AI"}
                </p>
                <Predictor />
            </div>
        </PredictionProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Stock Predictor Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Resolution policy: {:?}", settings.resolution_policy);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
