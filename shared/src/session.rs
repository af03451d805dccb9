//! Page-lifetime authentication state and its reducer.
//!
//! All mutations go through [`Session::apply`], so a single event-handling
//! turn either applies an action completely or not at all. Persistence and
//! network calls live elsewhere; this module is pure.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::UserRef;

/// Lifecycle of the most recent login request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Bearer token passed explicitly to calls that need authorization.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Never print the token itself.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// Everything the auth store changes in response to.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// A login request was issued.
    LoginStarted,
    LoginSucceeded { user: UserRef, token: String },
    LoginFailed(String),
    /// Adopt a previously stored session without a network call.
    SetUserFromToken { user: UserRef, token: String },
    Logout,
    ClearError,
}

/// Authentication state. `token` is present exactly when the user is
/// considered authenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<UserRef>,
    token: Option<String>,
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl Session {
    /// Session adopted from storage at startup.
    pub fn restored(user: UserRef, token: String) -> Self {
        let mut session = Self::default();
        session.apply(AuthAction::SetUserFromToken { user, token });
        session
    }

    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            AuthAction::LoginSucceeded { user, token } => {
                self.status = RequestStatus::Succeeded;
                self.user = Some(user);
                self.token = Some(token);
            }
            AuthAction::LoginFailed(message) => {
                // A failed attempt keeps whatever session was already held.
                self.status = RequestStatus::Failed;
                self.error = Some(message);
            }
            AuthAction::SetUserFromToken { user, token } => {
                self.user = Some(user);
                self.token = Some(token);
            }
            AuthAction::Logout => {
                self.user = None;
                self.token = None;
            }
            AuthAction::ClearError => {
                self.error = None;
            }
        }
    }

    pub fn current_user(&self) -> Option<&UserRef> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.token.as_deref().map(Credentials::new)
    }

    /// The `{user, token}` pair, when both are held.
    pub fn pair(&self) -> Option<(&UserRef, &str)> {
        self.user.as_ref().zip(self.token.as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }
}
