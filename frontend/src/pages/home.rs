use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="container hero">
            <h1>{ "Smart Laundry" }</h1>
            <p class="subtitle">
                { "Doorstep pickup, professional cleaning and on-time delivery." }
            </p>
            <Link<Route> to={Route::Services} classes="btn btn-primary">
                { "Browse services" }
            </Link<Route>>
        </div>
    }
}
