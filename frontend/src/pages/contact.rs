use yew::prelude::*;

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <div class="container">
            <h2>{ "Contact" }</h2>
            <p>{ "Email: support@smartlaundry.example" }</p>
            <p>{ "Phone: +91 98765 43210" }</p>
        </div>
    }
}
