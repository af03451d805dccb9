use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::state::auth::{logout, use_auth};
use crate::state::theme::use_theme;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let auth = use_auth();
    let theme = use_theme();
    let navigator = use_navigator();

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            logout(&auth);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| theme.set(theme.toggled()))
    };

    let account = match auth.current_user() {
        Some(user) => {
            let (route, label) = if user.role.is_admin() {
                (Route::Admin, "Admin")
            } else {
                (Route::Dashboard, "Dashboard")
            };
            html! {
                <>
                    <Link<Route> to={route}>{ label }</Link<Route>>
                    <button class="link-button" onclick={on_logout}>{ "Logout" }</button>
                </>
            }
        }
        None => html! { <Link<Route> to={Route::Login}>{ "Login" }</Link<Route>> },
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{ "Smart Laundry" }</h1>
                <nav>
                    <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                    <Link<Route> to={Route::Services}>{ "Services" }</Link<Route>>
                    <Link<Route> to={Route::Cart}>{ "Cart" }</Link<Route>>
                    { account }
                    <button class="theme-toggle" onclick={on_toggle_theme}>
                        { if theme.is_dark() { "Light mode" } else { "Dark mode" } }
                    </button>
                </nav>
            </div>
        </header>
    }
}
