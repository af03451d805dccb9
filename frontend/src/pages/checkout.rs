use yew::prelude::*;

#[function_component(Checkout)]
pub fn checkout() -> Html {
    html! {
        <div class="container">
            <h2>{ "Checkout" }</h2>
            <p>{ "Choose a pickup slot and confirm your order." }</p>
        </div>
    }
}
