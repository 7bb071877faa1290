use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusTextProps {
    pub text: AttrValue,
}

/// Text-only status line shown in place of the chart
#[function_component(StatusText)]
pub fn status_text(props: &StatusTextProps) -> Html {
    html! {
        <p class="mt-10 text-gray-600">{props.text.clone()}</p>
    }
}
