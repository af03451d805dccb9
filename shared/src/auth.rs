//! Login orchestration over an abstract backend.
//!
//! [`login_user`] is the store's async login operation: it reports progress
//! through `dispatch` so the caller decides where the session lives, and
//! persists the session on success before the success action is applied.

use crate::api::{LoginRequest, LoginResponse, SendOtpRequest};
use crate::error::AppError;
use crate::persistence::{SessionBackend, SessionPersistence};
use crate::session::AuthAction;

/// Backend operations the login flow depends on.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn send_otp(&self, request: &SendOtpRequest) -> Result<(), AppError>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError>;
}

/// Fallback message when the backend gives no usable error text.
pub const LOGIN_FAILED: &str = "Login failed";

/// Text recorded for a failed login: the backend's `{ message }`, or
/// [`LOGIN_FAILED`] for anything else (network errors, HTML error pages,
/// empty bodies).
pub fn login_failure_message(err: &AppError) -> String {
    err.backend_message().unwrap_or(LOGIN_FAILED).to_string()
}

/// Issues one login call and drives the session through
/// `LoginStarted -> LoginSucceeded | LoginFailed`.
///
/// Overlapping calls are not deduplicated; whichever settles last is what
/// the session ends up holding.
pub async fn login_user<A, B, D>(
    api: &A,
    persistence: &SessionPersistence<B>,
    request: LoginRequest,
    remember: bool,
    mut dispatch: D,
) -> Result<LoginResponse, AppError>
where
    A: AuthApi,
    B: SessionBackend,
    D: FnMut(AuthAction),
{
    dispatch(AuthAction::LoginStarted);

    match api.login(&request).await {
        Ok(response) => {
            if let Err(err) = persistence.save(&response.user, &response.token, remember) {
                tracing::warn!("session not persisted: {err}");
            }
            tracing::info!(role = %response.user.role, "login succeeded");
            dispatch(AuthAction::LoginSucceeded {
                user: response.user.clone(),
                token: response.token.clone(),
            });
            Ok(response)
        }
        Err(err) => {
            tracing::warn!("login rejected: {err}");
            dispatch(AuthAction::LoginFailed(login_failure_message(&err)));
            Err(err)
        }
    }
}

/// Clears the durable copy of the session, then the in-memory one. Calls
/// made afterwards carry no credentials because the session has none.
pub fn logout<B, D>(persistence: &SessionPersistence<B>, mut dispatch: D)
where
    B: SessionBackend,
    D: FnMut(AuthAction),
{
    persistence.clear();
    dispatch(AuthAction::Logout);
    tracing::info!("logged out");
}

/// Startup restoration: adopts the stored session without a network call.
pub fn restore_session<B, D>(persistence: &SessionPersistence<B>, mut dispatch: D) -> bool
where
    B: SessionBackend,
    D: FnMut(AuthAction),
{
    match persistence.restore() {
        Some(record) => {
            dispatch(AuthAction::SetUserFromToken {
                user: record.user,
                token: record.token,
            });
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::persistence::{MemoryBackend, SESSION_KEY};
    use crate::session::tests::user;
    use crate::session::{RequestStatus, Session};
    use std::cell::RefCell;

    struct FakeApi {
        outcome: Result<LoginResponse, AppError>,
        calls: RefCell<Vec<LoginRequest>>,
    }

    impl FakeApi {
        fn accepting(role: Role, token: &str) -> Self {
            Self {
                outcome: Ok(LoginResponse {
                    user: user("alice@example.com", role),
                    token: token.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn rejecting(error: AppError) -> Self {
            Self {
                outcome: Err(error),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl AuthApi for FakeApi {
        async fn send_otp(&self, _request: &SendOtpRequest) -> Result<(), AppError> {
            Ok(())
        }

        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
            self.calls.borrow_mut().push(request.clone());
            self.outcome.clone()
        }
    }

    fn request() -> LoginRequest {
        LoginRequest {
            email: "alice@example.com".to_string(),
            otp: "123456".to_string(),
        }
    }

    fn storage() -> (SessionPersistence<MemoryBackend>, MemoryBackend, MemoryBackend) {
        let durable = MemoryBackend::new();
        let tab = MemoryBackend::new();
        (
            SessionPersistence::new(durable.clone(), tab.clone()),
            durable,
            tab,
        )
    }

    #[tokio::test]
    async fn test_successful_login_updates_session_and_storage() {
        let api = FakeApi::accepting(Role::User, "tok-1");
        let (persistence, durable, _) = storage();
        let session = RefCell::new(Session::default());
        let seen = RefCell::new(Vec::new());

        let response = login_user(&api, &persistence, request(), true, |action| {
            seen.borrow_mut().push(session.borrow().status);
            session.borrow_mut().apply(action);
        })
        .await
        .unwrap();

        assert_eq!(response.token, "tok-1");
        assert_eq!(api.calls.borrow().as_slice(), &[request()]);
        assert_eq!(
            seen.borrow().as_slice(),
            &[RequestStatus::Idle, RequestStatus::Loading]
        );
        let session = session.borrow();
        assert_eq!(session.status, RequestStatus::Succeeded);
        assert!(session.is_authenticated());
        assert_eq!(durable.keys(), vec![SESSION_KEY.to_string()]);

        let restored = persistence.restore().unwrap();
        assert_eq!(Some((&restored.user, restored.token.as_str())), session.pair());
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_session_and_storage_alone() {
        let api = FakeApi::rejecting(AppError::from_http(400, r#"{"message":"Invalid OTP"}"#));
        let (persistence, durable, tab) = storage();
        let previous = Session::restored(user("bob@example.com", Role::User), "old".to_string());
        let session = RefCell::new(previous.clone());

        let result = login_user(&api, &persistence, request(), true, |action| {
            session.borrow_mut().apply(action);
        })
        .await;

        assert!(result.is_err());
        let session = session.borrow();
        assert_eq!(session.status, RequestStatus::Failed);
        assert_eq!(session.error.as_deref(), Some("Invalid OTP"));
        assert_eq!(session.pair(), previous.pair());
        assert!(durable.keys().is_empty());
        assert!(tab.keys().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_uses_generic_message() {
        let api = FakeApi::rejecting(AppError::Network("connection refused".to_string()));
        let (persistence, _, _) = storage();
        let session = RefCell::new(Session::default());

        let _ = login_user(&api, &persistence, request(), false, |action| {
            session.borrow_mut().apply(action);
        })
        .await;

        assert_eq!(session.borrow().error.as_deref(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_bodies_without_message_field_use_generic_message() {
        for (status, body) in [
            (500, "<html><body>Internal Server Error</body></html>"),
            (502, ""),
        ] {
            let api = FakeApi::rejecting(AppError::from_http(status, body));
            let (persistence, _, _) = storage();
            let session = RefCell::new(Session::default());

            let err = login_user(&api, &persistence, request(), false, |action| {
                session.borrow_mut().apply(action);
            })
            .await
            .unwrap_err();

            assert_eq!(session.borrow().error.as_deref(), Some(LOGIN_FAILED));
            assert_eq!(login_failure_message(&err), LOGIN_FAILED);
        }
    }

    #[test]
    fn test_restore_then_logout() {
        let (persistence, durable, tab) = storage();
        persistence
            .save(&user("a@b.co", Role::Admin), "tok", false)
            .unwrap();
        let session = RefCell::new(Session::default());

        assert!(restore_session(&persistence, |action| session.borrow_mut().apply(action)));
        assert!(session.borrow().is_authenticated());

        logout(&persistence, |action| session.borrow_mut().apply(action));
        assert!(!session.borrow().is_authenticated());
        assert!(session.borrow().credentials().is_none());
        assert!(durable.keys().is_empty());
        assert!(tab.keys().is_empty());
        assert!(!restore_session(&persistence, |action| session.borrow_mut().apply(action)));
    }
}
