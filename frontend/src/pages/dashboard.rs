use laundry_shared::api::MyOrder;
use laundry_shared::AppError;
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::state::auth::{logout, use_auth};

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let auth = use_auth();
    let orders = use_state(|| None::<Result<Vec<MyOrder>, AppError>>);

    {
        let orders = orders.clone();
        let auth = auth.clone();
        use_effect_with(auth.credentials(), move |credentials| {
            if let Some(credentials) = credentials.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let result = ApiService::new().my_orders(&credentials).await;
                    if let Err(err) = &result {
                        tracing::error!("Failed to fetch orders: {err}");
                        if err.is_unauthorized() {
                            logout(&auth);
                        }
                    }
                    orders.set(Some(result));
                });
            }
            || ()
        });
    }

    let greeting = auth
        .current_user()
        .map(|user| format!("Welcome, {}", user.display_name()))
        .unwrap_or_default();

    let body = match &*orders {
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(Err(err)) => html! {
            <p class="form-error">{ err.user_message() }</p>
        },
        Some(Ok(orders)) if orders.is_empty() => html! {
            <div class="empty-state">
                <h2>{ "No orders yet!" }</h2>
                <p>{ "Book a service and your orders will appear here." }</p>
            </div>
        },
        Some(Ok(orders)) => html! {
            <table class="orders">
                <thead>
                    <tr>
                        <th>{ "Order" }</th>
                        <th>{ "Service" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Total" }</th>
                        <th>{ "Placed" }</th>
                        <th>{ "Pickup" }</th>
                        <th>{ "Delivery" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for orders.iter().map(|order| html! {
                        <tr key={order.id.clone()}>
                            <td>{ order.id.clone() }</td>
                            <td>{ order.service_name.clone() }</td>
                            <td>{ order.status.clone() }</td>
                            <td>{ format!("{:.2}", order.total) }</td>
                            <td>{ order.created_at.clone() }</td>
                            <td>{ order.pickup_time.clone().unwrap_or_else(|| "-".to_string()) }</td>
                            <td>{ order.delivery_time.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="container">
            <h2>{ "My Orders" }</h2>
            <p class="subtitle">{ greeting }</p>
            { body }
        </div>
    }
}
