use laundry_shared::api::AdminOrder;
use laundry_shared::AppError;
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::state::auth::{logout, use_auth};

#[function_component(Admin)]
pub fn admin() -> Html {
    let auth = use_auth();
    let orders = use_state(|| None::<Result<Vec<AdminOrder>, AppError>>);

    {
        let orders = orders.clone();
        let auth = auth.clone();
        use_effect_with(auth.credentials(), move |credentials| {
            if let Some(credentials) = credentials.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let result = ApiService::new().admin_orders(&credentials).await;
                    if let Err(err) = &result {
                        tracing::error!("Failed to fetch admin orders: {err}");
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

    let body = match &*orders {
        None => html! { <div class="loading">{ "Loading orders..." }</div> },
        Some(Err(err)) => html! { <p class="form-error">{ err.user_message() }</p> },
        Some(Ok(orders)) if orders.is_empty() => html! { <p>{ "No orders found." }</p> },
        Some(Ok(orders)) => html! {
            <table class="orders">
                <thead>
                    <tr>
                        <th>{ "Order ID" }</th>
                        <th>{ "User" }</th>
                        <th>{ "Items" }</th>
                        <th>{ "Total" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Created" }</th>
                        <th>{ "Pickup" }</th>
                        <th>{ "Delivery" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for orders.iter().map(|order| html! {
                        <tr key={order.id.clone()}>
                            <td>{ order.id.clone() }</td>
                            <td>{ order.user_id.clone() }</td>
                            <td>{ order.items.len().to_string() }</td>
                            <td>{ format!("{:.2}", order.total) }</td>
                            <td>{ order.status.clone() }</td>
                            <td>{ order.created_at.clone() }</td>
                            <td>{ order.pickup_time.as_deref().unwrap_or("-") }</td>
                            <td>{ order.delivery_time.as_deref().unwrap_or("-") }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="container">
            <h2>{ "Admin Dashboard" }</h2>
            { body }
        </div>
    }
}
