//! OTP login page.
//!
//! All state transitions go through [`LoginFlow`]; this component only wires
//! DOM events, timers and network calls to it.

use std::ops::Deref;
use std::rc::Rc;

use chrono::Utc;
use gloo::timers::callback::{Interval, Timeout};
use laundry_shared::auth::{login_failure_message, AuthApi};
use laundry_shared::identifier::{self, IdentifierKind};
use laundry_shared::login_flow::{LoginEvent, LoginFlow, PendingRequest, SHAKE_DURATION_MS};
use laundry_shared::navigation::post_login_destination;
use laundry_shared::session::AuthAction;
use laundry_shared::ValidationError;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::toast::use_toaster;
use crate::router::{route_for, LoginRedirect};
use crate::services::api::ApiService;
use crate::state::auth::{self, use_auth};

const OTP_SENT: &str = "OTP sent successfully!";
const OTP_SEND_FAILED: &str = "Failed to send OTP. Try again!";
const OTP_RESENT: &str = "OTP resent successfully to your email/phone!";
const OTP_RESEND_FAILED: &str = "Failed to resend OTP.";
const INVALID_OTP: &str = "Invalid OTP. Try again.";
const LOGIN_SUCCEEDED: &str = "Login successful!";

#[derive(Debug, Default, PartialEq)]
struct LoginState(LoginFlow);

impl Deref for LoginState {
    type Target = LoginFlow;

    fn deref(&self) -> &LoginFlow {
        &self.0
    }
}

impl Reducible for LoginState {
    type Action = LoginEvent;

    fn reduce(self: Rc<Self>, event: LoginEvent) -> Rc<Self> {
        let mut flow = self.0.clone();
        flow.apply(event);
        Rc::new(Self(flow))
    }
}

#[function_component(Login)]
pub fn login() -> Html {
    let flow = use_reducer(LoginState::default);
    let auth = use_auth();
    let toaster = use_toaster();
    let navigator = use_navigator();
    let location = use_location();
    let api = use_memo((), |_| ApiService::new());
    let otp_ref = use_node_ref();

    let captured_from = location
        .and_then(|location| location.state::<LoginRedirect>())
        .map(|redirect| redirect.from.clone());

    // Already signed in: leave the login page. Otherwise start without the
    // previous attempt's error.
    {
        let auth = auth.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            match (auth.current_user(), navigator) {
                (Some(user), Some(navigator)) => {
                    navigator.replace(&route_for(&post_login_destination(user, None)));
                }
                _ => auth.dispatch(AuthAction::ClearError),
            }
            || ()
        });
    }

    // Resend countdown, one tick per second while the cooldown runs.
    {
        let dispatcher = flow.dispatcher();
        use_effect_with(flow.cooldown_active(), move |active| {
            let interval = active
                .then(|| Interval::new(1_000, move || dispatcher.dispatch(LoginEvent::Tick)));
            move || drop(interval)
        });
    }

    {
        let dispatcher = flow.dispatcher();
        use_effect_with(flow.shake, move |shake| {
            let timeout = shake.then(|| {
                Timeout::new(SHAKE_DURATION_MS, move || {
                    dispatcher.dispatch(LoginEvent::ShakeCleared)
                })
            });
            move || drop(timeout)
        });
    }

    {
        let otp_ref = otp_ref.clone();
        use_effect_with(flow.is_otp_sent(), move |sent| {
            if *sent {
                if let Some(input) = otp_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let send_otp = {
        let flow = flow.clone();
        let api = api.clone();
        let toaster = toaster.clone();
        Callback::from(move |_: ()| match flow.send_otp_request() {
            Err(ValidationError::Busy) => {}
            Err(error) => {
                toaster.error(error.to_string());
                flow.dispatch(LoginEvent::Rejected(error));
            }
            Ok(request) => {
                tracing::info!(kind = identifier_kind(&request.email), "sending OTP");
                flow.dispatch(LoginEvent::SendRequested);
                let flow = flow.clone();
                let api = api.clone();
                let toaster = toaster.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api.send_otp(&request).await {
                        Ok(()) => {
                            flow.dispatch(LoginEvent::OtpSent {
                                identifier: request.email,
                                at: Utc::now(),
                            });
                            toaster.success(OTP_SENT);
                        }
                        Err(err) => {
                            tracing::error!("Failed to send OTP: {err}");
                            flow.dispatch(LoginEvent::SendFailed(err.user_message()));
                            toaster.error(OTP_SEND_FAILED);
                        }
                    }
                });
            }
        })
    };

    let on_identifier_submit = {
        let send_otp = send_otp.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            send_otp.emit(());
        })
    };

    let on_resend = {
        let send_otp = send_otp.clone();
        Callback::from(move |_: MouseEvent| send_otp.emit(()))
    };

    let on_verify = {
        let flow = flow.clone();
        let api = api.clone();
        let toaster = toaster.clone();
        let auth = auth.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match flow.login_request() {
                Ok(request) => request,
                Err(ValidationError::Busy) => return,
                Err(error) => {
                    toaster.error(error.to_string());
                    flow.dispatch(LoginEvent::Rejected(error));
                    return;
                }
            };

            flow.dispatch(LoginEvent::VerifyRequested { at: Utc::now() });
            let remember = flow.remember;
            let flow = flow.clone();
            let api = api.clone();
            let toaster = toaster.clone();
            let auth = auth.clone();
            let navigator = navigator.clone();
            let captured_from = captured_from.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match auth::login(&auth, &api, request, remember).await {
                    Ok(response) => {
                        flow.dispatch(LoginEvent::LoginSucceeded);
                        toaster.success(LOGIN_SUCCEEDED);
                        let destination =
                            post_login_destination(&response.user, captured_from.as_deref());
                        if let Some(navigator) = navigator {
                            navigator.replace(&route_for(&destination));
                        }
                    }
                    Err(err) => {
                        flow.dispatch(LoginEvent::LoginFailed(login_failure_message(&err)));
                        toaster.error(INVALID_OTP);
                    }
                }
            });
        })
    };

    let on_identifier_input = {
        let flow = flow.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            flow.dispatch(LoginEvent::IdentifierChanged(input.value()));
        })
    };

    let on_otp_input = {
        let flow = flow.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            flow.dispatch(LoginEvent::OtpChanged(input.value()));
        })
    };

    let on_remember = {
        let flow = flow.clone();
        Callback::from(move |_: Event| flow.dispatch(LoginEvent::RememberToggled))
    };

    let on_change_identifier = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| flow.dispatch(LoginEvent::ChangeIdentifier))
    };

    let on_google = {
        let api = api.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = gloo::utils::window()
                .location()
                .set_href(api.google_auth_url())
            {
                tracing::error!("Failed to start Google sign-in: {err:?}");
            }
        })
    };

    let on_forgot_open = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| flow.dispatch(LoginEvent::ForgotOpened))
    };

    let forgot_overlay = flow.forgot.as_ref().map(|overlay| {
        let on_input = {
            let flow = flow.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                flow.dispatch(LoginEvent::ForgotInputChanged(input.value()));
            })
        };
        let on_cancel = {
            let flow = flow.clone();
            Callback::from(move |_: MouseEvent| flow.dispatch(LoginEvent::ForgotClosed))
        };
        let on_send = {
            let flow = flow.clone();
            let api = api.clone();
            let toaster = toaster.clone();
            Callback::from(move |_: MouseEvent| match flow.forgot_request() {
                Err(ValidationError::Busy | ValidationError::NoPendingChallenge) => {}
                Err(error) => {
                    toaster.error(error.to_string());
                    flow.dispatch(LoginEvent::Rejected(error));
                }
                Ok(request) => {
                    tracing::info!(kind = identifier_kind(&request.email), "resending OTP");
                    flow.dispatch(LoginEvent::ForgotRequested);
                    let flow = flow.clone();
                    let api = api.clone();
                    let toaster = toaster.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match api.send_otp(&request).await {
                            Ok(()) => {
                                flow.dispatch(LoginEvent::OtpSent {
                                    identifier: request.email,
                                    at: Utc::now(),
                                });
                                toaster.success(OTP_RESENT);
                            }
                            Err(err) => {
                                tracing::error!("Failed to resend OTP: {err}");
                                flow.dispatch(LoginEvent::ForgotFailed(err.user_message()));
                                toaster.error(OTP_RESEND_FAILED);
                            }
                        }
                    });
                }
            })
        };

        html! {
            <div class="modal-backdrop">
                <div class="modal">
                    <h2>{ "Reset OTP" }</h2>
                    <input
                        type="text"
                        placeholder="Enter your email or phone"
                        value={overlay.identifier.clone()}
                        oninput={on_input}
                    />
                    <div class="modal-actions">
                        <button class="btn btn-secondary" onclick={on_cancel}>{ "Cancel" }</button>
                        <button class="btn btn-primary" onclick={on_send} disabled={overlay.sending}>
                            { if overlay.sending { "Sending OTP..." } else { "Send OTP" } }
                        </button>
                    </div>
                </div>
            </div>
        }
    });

    let form = match flow.resend_in() {
        None => html! {
            <form class="login-form" onsubmit={on_identifier_submit}>
                <input
                    type="text"
                    name="email"
                    aria-label="Email or Phone"
                    placeholder="Email or Phone"
                    value={flow.identifier.clone()}
                    oninput={on_identifier_input}
                    required=true
                />
                <label class="remember">
                    <input type="checkbox" checked={flow.remember} onchange={on_remember} />
                    { "Remember Me" }
                </label>
                <button type="submit" class="btn btn-primary" disabled={flow.is_busy()}>
                    { if flow.pending == Some(PendingRequest::SendingOtp) { "Sending OTP..." } else { "Send OTP" } }
                </button>
                <button type="button" class="link-button" onclick={on_forgot_open}>
                    { "Forgot OTP?" }
                </button>
            </form>
        },
        Some(resend_in) => html! {
            <form class="login-form" onsubmit={on_verify}>
                <input
                    ref={otp_ref}
                    type="text"
                    aria-label="OTP"
                    placeholder="Enter OTP"
                    class={classes!("otp-input", flow.shake.then_some("shake"))}
                    value={flow.otp.clone()}
                    oninput={on_otp_input}
                    required=true
                />
                <div class="otp-actions">
                    <button type="button" class="link-button" onclick={on_change_identifier}>
                        { "Change Email" }
                    </button>
                    if resend_in > 0 {
                        <span>{ format!("Resend in {resend_in}s") }</span>
                    } else {
                        <button
                            type="button"
                            class="link-button"
                            onclick={on_resend}
                            disabled={!flow.can_resend()}
                        >
                            { "Resend OTP" }
                        </button>
                    }
                </div>
                <button type="submit" class="btn btn-success" disabled={flow.is_busy() || auth.is_loading()}>
                    { if flow.pending == Some(PendingRequest::Verifying) { "Verifying..." } else { "Verify & Login" } }
                </button>
            </form>
        },
    };

    html! {
        <div class="container login-page">
            <div class="card">
                <h1>{ "Welcome Back" }</h1>
                <p class="subtitle">{ "Login to Smart Laundry" }</p>
                { form }
                if let Some(error) = &flow.error {
                    <p class="form-error">{ error.clone() }</p>
                }
                <div class="divider"><span>{ "OR" }</span></div>
                <button class="btn btn-google" onclick={on_google}>
                    { "Continue with Google" }
                </button>
                <p class="hint">
                    { "Use your registered email or phone to login. OTP will be sent immediately." }
                </p>
            </div>
            { for forgot_overlay }
        </div>
    }
}

/// Identifiers are logged by kind only.
fn identifier_kind(value: &str) -> &'static str {
    identifier::classify(value).map_or("unknown", IdentifierKind::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_applies_flow_events() {
        let state = Rc::new(LoginState::default())
            .reduce(LoginEvent::IdentifierChanged("alice@example.com".to_string()))
            .reduce(LoginEvent::RememberToggled);

        assert_eq!(state.identifier, "alice@example.com");
        assert!(state.remember);
        assert!(!state.is_otp_sent());
    }

    #[test]
    fn test_identifier_kind_hides_value() {
        assert_eq!(identifier_kind("alice@example.com"), "email");
        assert_eq!(identifier_kind("9876543210"), "phone");
        assert_eq!(identifier_kind("nope"), "unknown");
    }
}
