use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::services::find_service;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct ServiceDetailProps {
    pub id: String,
}

#[function_component(ServiceDetail)]
pub fn service_detail(props: &ServiceDetailProps) -> Html {
    let Some(service) = find_service(&props.id) else {
        return html! {
            <div class="container empty-state">
                <h2>{ "Service not found" }</h2>
                <Link<Route> to={Route::Services}>{ "Back to services" }</Link<Route>>
            </div>
        };
    };

    html! {
        <div class="container">
            <h2>{ service.name }</h2>
            <p>{ service.description }</p>
            <p class="price">{ service.price }</p>
            <Link<Route> to={Route::Cart} classes="btn btn-primary">{ "Go to cart" }</Link<Route>>
        </div>
    }
}
