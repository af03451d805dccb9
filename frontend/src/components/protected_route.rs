use laundry_shared::guard::{self, GuardDecision};
use laundry_shared::models::Role;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::{login_redirect, route_for};
use crate::state::auth::use_auth;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    /// Role the signed-in user must hold; any signed-in user when absent.
    #[prop_or_default]
    pub role: Option<Role>,
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children only when the session passes the guard, otherwise
/// replaces the current history entry with the redirect target.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let location = use_location();
    let decision = guard::evaluate(&auth, props.role.as_ref());

    {
        let decision = decision.clone();
        let from = location.map(|location| location.path().to_string());
        use_effect_with(decision, move |decision| {
            if let (GuardDecision::Redirect(target), Some(navigator)) = (decision, navigator) {
                tracing::debug!(%target, "guard redirect");
                match login_redirect(target, from.as_deref()) {
                    Some(state) => navigator.replace_with_state(&route_for(target), state),
                    None => navigator.replace(&route_for(target)),
                }
            }
            || ()
        });
    }

    match decision {
        GuardDecision::Render => props.children.clone(),
        GuardDecision::Redirect(_) => Html::default(),
    }
}
