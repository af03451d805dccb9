use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Cart)]
pub fn cart() -> Html {
    html! {
        <div class="container">
            <h2>{ "Your Cart" }</h2>
            <div class="empty-state">
                <p>{ "Your cart is empty." }</p>
                <Link<Route> to={Route::Services}>{ "Browse services" }</Link<Route>>
            </div>
            <Link<Route> to={Route::Checkout} classes="btn btn-primary">
                { "Proceed to checkout" }
            </Link<Route>>
        </div>
    }
}
