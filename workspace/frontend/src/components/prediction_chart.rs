use common::{chart_points, ChartPoint, PredictionResult, SERIES_NAME};
use plotly::common::{Line, LineShape, Marker, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

const CHART_ID: &str = "prediction-chart";
const LINE_COLOR: &str = "#4f46e5";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

// Plotly wants plain objects, not JS Maps
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Line series of the predicted prices, one point per day
pub fn prediction_trace(points: &[ChartPoint]) -> Box<Scatter<String, f64>> {
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();

    Scatter::new(labels, values)
        .mode(Mode::LinesMarkers)
        .name(SERIES_NAME)
        .line(Line::new().color(LINE_COLOR).shape(LineShape::Spline).width(2.0))
        .marker(Marker::new().color(LINE_COLOR).size(8))
}

/// Auto-scaled value axis, gridlines on both axes, legend shown
pub fn prediction_layout() -> Layout {
    Layout::new()
        .x_axis(Axis::new().title(Title::with_text("Day")).show_grid(true))
        .y_axis(
            Axis::new()
                .title(Title::with_text("Price"))
                .auto_range(true)
                .show_grid(true),
        )
        .show_legend(true)
        .height(400)
}

#[derive(Properties, PartialEq)]
pub struct PredictionChartProps {
    pub predictions: PredictionResult,
}

/// Chart of a prediction. Renders nothing for an empty prediction.
#[function_component(PredictionChart)]
pub fn prediction_chart(props: &PredictionChartProps) -> Html {
    if props.predictions.is_empty() {
        return html! {};
    }

    html! { <PlotlyChart points={chart_points(&props.predictions)} /> }
}

#[derive(Properties, PartialEq)]
struct PlotlyChartProps {
    points: Vec<ChartPoint>,
}

#[function_component(PlotlyChart)]
fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.points.clone()),
        move |(container_ref, points)| {
            if container_ref.cast::<Element>().is_some() {
                let traces = vec![prediction_trace(points)];
                let layout = prediction_layout();
                let config = serde_json::json!({"responsive": true, "displayModeBar": false});

                match (to_js(&traces), to_js(&layout), to_js(&config)) {
                    (Ok(data), Ok(layout), Ok(config)) => newPlot(CHART_ID, data, layout, config),
                    _ => log::error!("Failed to serialize prediction chart for plotly"),
                }
            }
            || ()
        },
    );

    html! {
        <div class="mt-10 flex justify-center">
            <div ref={container_ref} id={CHART_ID} style="width:90%; height:400px;"></div>
        </div>
    }
}
