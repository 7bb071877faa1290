use common::{Symbol, TicketIssuer};
use yew::prelude::*;
use crate::api_client::prediction::fetch_prediction;
use crate::hooks::{PredictionAction, PredictionContext, PredictionStore};
use crate::settings;
use super::notify::notify_failure;

#[derive(Properties, PartialEq)]
pub struct PredictionProviderProps {
    pub children: Children,
}

/// Owns the prediction request state and shares it with its children.
///
/// Every submission moves the state to Pending and starts a fetch. Nothing is
/// cancelled; the resolution policy from settings decides whether a
/// superseded fetch may still land.
#[function_component(PredictionProvider)]
pub fn prediction_provider(props: &PredictionProviderProps) -> Html {
    let store = use_reducer(|| PredictionStore::new(settings::get_settings().resolution_policy));
    let issuer = use_mut_ref(TicketIssuer::default);

    let submit = {
        let dispatcher = store.dispatcher();
        let issuer = issuer.clone();

        use_callback((), move |symbol: Symbol, _| {
            let ticket = issuer.borrow_mut().issue();
            log::info!("Requesting prediction {} for {}", ticket, symbol);
            dispatcher.dispatch(PredictionAction::Submit {
                ticket,
                symbol: symbol.clone(),
            });

            let dispatcher = dispatcher.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = fetch_prediction(&symbol).await;
                dispatcher.dispatch(PredictionAction::Resolve {
                    ticket,
                    symbol,
                    outcome,
                });
            });
        })
    };

    // Alert once per applied failure
    {
        let pending_alert = store
            .cycle
            .failure_to_notify()
            .map(|(key, failure)| (key, failure.clone()));
        use_effect_with(pending_alert, |pending_alert| {
            if let Some((_, failure)) = pending_alert {
                notify_failure(failure);
            }
            || ()
        });
    }

    let context = PredictionContext {
        state: store.cycle.state().clone(),
        submit,
    };

    html! {
        <ContextProvider<PredictionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<PredictionContext>>
    }
}
