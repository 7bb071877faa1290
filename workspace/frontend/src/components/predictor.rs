use yew::prelude::*;
use crate::hooks::{use_prediction, PredictionView};
use crate::ui::loading::StatusText;
use super::prediction_chart::PredictionChart;
use super::symbol_input::SymbolInput;

/// Symbol input, status line and chart wired to the prediction cycle
#[function_component(Predictor)]
pub fn predictor() -> Html {
    let prediction = use_prediction();

    // Pending replaces the chart with a placeholder until the request resolves
    let body = match prediction.view() {
        PredictionView::Predicting => html! { <StatusText text="Predicting..." /> },
        PredictionView::Chart(predictions) => html! { <PredictionChart {predictions} /> },
    };

    html! {
        <>
            <SymbolInput on_submit={prediction.submit.clone()} />
            {body}
        </>
    }
}
