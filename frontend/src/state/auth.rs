//! Auth context for the component tree.
//!
//! The provider restores any stored session synchronously while building its
//! initial state, so protected routes never see a signed-out first render
//! for a user who is actually signed in.

use std::ops::Deref;
use std::rc::Rc;

use laundry_shared::api::{LoginRequest, LoginResponse};
use laundry_shared::auth::{self, restore_session};
use laundry_shared::session::{AuthAction, Session};
use laundry_shared::AppError;
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::services::storage::session_persistence;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState(pub Session);

impl AuthState {
    fn restore() -> Self {
        let mut session = Session::default();
        if restore_session(&session_persistence(), |action| session.apply(action)) {
            tracing::info!("restored stored session");
        }
        Self(session)
    }
}

impl Deref for AuthState {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: AuthAction) -> Rc<Self> {
        let mut session = self.0.clone();
        session.apply(action);
        Rc::new(Self(session))
    }
}

pub type AuthContext = UseReducerHandle<AuthState>;

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth = use_reducer(AuthState::restore);

    html! {
        <ContextProvider<AuthContext> context={auth}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

/// Current auth context, or an empty signed-out one outside a provider.
#[hook]
pub fn use_auth() -> AuthContext {
    let fallback = use_reducer(AuthState::default);
    use_context::<AuthContext>().unwrap_or(fallback)
}

pub async fn login(
    auth: &AuthContext,
    api: &ApiService,
    request: LoginRequest,
    remember: bool,
) -> Result<LoginResponse, AppError> {
    auth::login_user(api, &session_persistence(), request, remember, |action| {
        auth.dispatch(action)
    })
    .await
}

pub fn logout(auth: &AuthContext) {
    auth::logout(&session_persistence(), |action| auth.dispatch(action));
}
