use yew::prelude::*;

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <div class="container">
            <h2>{ "About Us" }</h2>
            <p>
                { "Smart Laundry picks up, cleans and delivers your clothes so you can spend your time elsewhere." }
            </p>
        </div>
    }
}
