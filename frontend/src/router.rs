use laundry_shared::models::Role;
use laundry_shared::navigation::AppPath;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::protected_route::ProtectedRoute;
use crate::pages::{
    about::About, admin::Admin, cart::Cart, checkout::Checkout, contact::Contact,
    dashboard::Dashboard, home::Home, login::Login, not_found::NotFound,
    service_detail::ServiceDetail, services::Services,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/services")]
    Services,
    #[at("/services/:id")]
    ServiceDetail { id: String },
    #[at("/aboutus")]
    About,
    #[at("/contact")]
    Contact,
    #[at("/cart")]
    Cart,
    #[at("/checkout")]
    Checkout,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// History state attached to a guard redirect so login can send the user
/// back where they were headed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRedirect {
    pub from: String,
}

/// History state for a guard redirect: only redirects to login remember
/// where the visitor was headed.
pub fn login_redirect(target: &AppPath, current_path: Option<&str>) -> Option<LoginRedirect> {
    match (target, current_path) {
        (AppPath::Login, Some(from)) => Some(LoginRedirect {
            from: from.to_string(),
        }),
        _ => None,
    }
}

/// Maps a navigation target onto a route. Unknown paths land on home.
pub fn route_for(path: &AppPath) -> Route {
    match path {
        AppPath::Home => Route::Home,
        AppPath::Login => Route::Login,
        AppPath::Services => Route::Services,
        AppPath::Dashboard => Route::Dashboard,
        AppPath::Admin => Route::Admin,
        AppPath::Other(path) => Route::recognize(path)
            .filter(|route| *route != Route::NotFound)
            .unwrap_or(Route::Home),
    }
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Services => html! { <Services /> },
        Route::ServiceDetail { id } => html! { <ServiceDetail {id} /> },
        Route::About => html! { <About /> },
        Route::Contact => html! { <Contact /> },
        Route::Cart => html! { <Cart /> },
        Route::Checkout => html! { <Checkout /> },
        Route::Login => html! { <Login /> },
        Route::Dashboard => html! {
            <ProtectedRoute role={Role::User}>
                <Dashboard />
            </ProtectedRoute>
        },
        Route::Admin => html! {
            <ProtectedRoute role={Role::Admin}>
                <Admin />
            </ProtectedRoute>
        },
        Route::NotFound => html! { <NotFound /> },
    }
}
