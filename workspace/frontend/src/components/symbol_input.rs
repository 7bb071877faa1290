use common::Symbol;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SymbolInputProps {
    pub on_submit: Callback<Symbol>,
}

/// Ticker text field with a Predict button.
///
/// Blank input is ignored. The typed text is kept after submitting.
#[function_component(SymbolInput)]
pub fn symbol_input(props: &SymbolInputProps) -> Html {
    let text = use_state(String::new);

    let on_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_submit = {
        let text = text.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match Symbol::parse(&text) {
                Ok(symbol) => on_submit.emit(symbol),
                Err(_) => log::trace!("Ignoring blank symbol submission"),
            }
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex items-center justify-center gap-2 mt-8">
            <input
                type="text"
                placeholder="Enter stock symbol (e.g. AAPL)"
                value={(*text).clone()}
                oninput={on_input}
                class="input input-bordered w-60"
            />
            <button type="submit" class="btn btn-primary">
                {"Predict"}
            </button>
        </form>
    }
}
