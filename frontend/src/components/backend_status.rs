use laundry_shared::liveness::BackendStatus;
use yew::prelude::*;

use crate::services::api::ApiService;

/// One-shot `/hello` probe shown under the navbar.
#[function_component(BackendStatusBanner)]
pub fn backend_status_banner() -> Html {
    let status = use_state(BackendStatus::default);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiService::new().hello().await;
                status.set(BackendStatus::from_probe(result));
            });
            || ()
        });
    }

    let class = match *status {
        BackendStatus::Checking => "backend-status",
        BackendStatus::Reachable(_) => "backend-status backend-up",
        BackendStatus::Unreachable => "backend-status backend-down",
    };

    html! {
        <p {class}>{ status.label() }</p>
    }
}
