mod components;
mod pages;
mod router;
mod services;
mod state;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::components::backend_status::BackendStatusBanner;
use crate::components::navbar::Navbar;
use crate::components::toast::ToastProvider;
use crate::router::{switch, Route};
use crate::state::auth::AuthProvider;
use crate::state::theme::ThemeProvider;

#[function_component(App)]
fn app() -> Html {
    html! {
        <ThemeProvider>
            <AuthProvider>
                <ToastProvider>
                    <BrowserRouter>
                        <div id="app">
                            <Navbar />
                            <BackendStatusBanner />
                            <yew_router::Switch<Route> render={switch} />
                        </div>
                    </BrowserRouter>
                </ToastProvider>
            </AuthProvider>
        </ThemeProvider>
    }
}

fn main() {
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
