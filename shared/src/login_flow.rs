//! Two-phase OTP login as an explicit state machine.
//!
//! ```text
//! AwaitingIdentifier --OtpSent--> OtpSent --LoginSucceeded--> (reset)
//!        ^                          |  ^
//!        +----ChangeIdentifier------+  +--LoginFailed (shake, stay)
//! ```
//!
//! The view asks the flow for a request (`send_otp_request`,
//! `login_request`, `forgot_request`), which validates locally and returns
//! an error instead of a request when nothing should go over the network.
//! Everything that happens afterwards is fed back in as a [`LoginEvent`].

use chrono::{DateTime, Utc};

use crate::api::{LoginRequest, SendOtpRequest};
use crate::error::ValidationError;
use crate::identifier;

/// Seconds before "resend" becomes available after an OTP is sent.
pub const RESEND_COOLDOWN_SECS: u32 = 30;
/// How long the OTP field stays flagged after a rejected code.
pub const SHAKE_DURATION_MS: u32 = 500;

/// An OTP that has been sent and not yet consumed. Lives only in the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub identifier: String,
    pub sent_at: DateTime<Utc>,
    pub verify_attempted_at: Option<DateTime<Utc>>,
    pub resend_in: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginStep {
    #[default]
    AwaitingIdentifier,
    OtpSent(OtpChallenge),
}

/// Request currently in flight from the main form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    SendingOtp,
    Verifying,
}

/// "Forgot OTP" overlay: sends a fresh OTP to a possibly different identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotOverlay {
    pub identifier: String,
    pub sending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    IdentifierChanged(String),
    OtpChanged(String),
    RememberToggled,
    /// Local validation refused to produce a request.
    Rejected(ValidationError),
    SendRequested,
    /// The backend accepted a send-OTP call for `identifier`.
    OtpSent {
        identifier: String,
        at: DateTime<Utc>,
    },
    SendFailed(String),
    /// One second of resend cooldown elapsed.
    Tick,
    VerifyRequested {
        at: DateTime<Utc>,
    },
    LoginFailed(String),
    ShakeCleared,
    LoginSucceeded,
    ChangeIdentifier,
    ForgotOpened,
    ForgotInputChanged(String),
    ForgotRequested,
    ForgotFailed(String),
    ForgotClosed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFlow {
    pub step: LoginStep,
    pub identifier: String,
    pub otp: String,
    pub remember: bool,
    pub shake: bool,
    pub pending: Option<PendingRequest>,
    pub forgot: Option<ForgotOverlay>,
    pub error: Option<String>,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn challenge(&self) -> Option<&OtpChallenge> {
        match &self.step {
            LoginStep::OtpSent(challenge) => Some(challenge),
            LoginStep::AwaitingIdentifier => None,
        }
    }

    pub fn is_otp_sent(&self) -> bool {
        self.challenge().is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Seconds left before resend, while an OTP is pending.
    pub fn resend_in(&self) -> Option<u32> {
        self.challenge().map(|challenge| challenge.resend_in)
    }

    pub fn cooldown_active(&self) -> bool {
        self.resend_in().is_some_and(|secs| secs > 0)
    }

    pub fn can_resend(&self) -> bool {
        self.resend_in() == Some(0) && !self.is_busy()
    }

    /// Request for the initial send, or a resend once the cooldown is over.
    pub fn send_otp_request(&self) -> Result<SendOtpRequest, ValidationError> {
        if self.is_busy() {
            return Err(ValidationError::Busy);
        }
        let identifier = match &self.step {
            LoginStep::AwaitingIdentifier => &self.identifier,
            LoginStep::OtpSent(challenge) if challenge.resend_in > 0 => {
                return Err(ValidationError::CooldownActive(challenge.resend_in));
            }
            LoginStep::OtpSent(challenge) => &challenge.identifier,
        };
        if !identifier::is_valid(identifier) {
            return Err(ValidationError::InvalidIdentifier);
        }
        Ok(SendOtpRequest {
            email: identifier.clone(),
        })
    }

    pub fn login_request(&self) -> Result<LoginRequest, ValidationError> {
        let challenge = self
            .challenge()
            .ok_or(ValidationError::NoPendingChallenge)?;
        if self.is_busy() {
            return Err(ValidationError::Busy);
        }
        if self.otp.trim().is_empty() {
            return Err(ValidationError::EmptyOtp);
        }
        Ok(LoginRequest {
            email: challenge.identifier.clone(),
            otp: self.otp.clone(),
        })
    }

    pub fn forgot_request(&self) -> Result<SendOtpRequest, ValidationError> {
        let overlay = self.forgot.as_ref().ok_or(ValidationError::NoPendingChallenge)?;
        if overlay.sending {
            return Err(ValidationError::Busy);
        }
        if !identifier::is_valid(&overlay.identifier) {
            return Err(ValidationError::InvalidResetIdentifier);
        }
        Ok(SendOtpRequest {
            email: overlay.identifier.clone(),
        })
    }

    pub fn apply(&mut self, event: LoginEvent) {
        match event {
            LoginEvent::IdentifierChanged(value) => {
                if !self.is_otp_sent() {
                    self.identifier = value;
                }
            }
            LoginEvent::OtpChanged(value) => self.otp = value,
            LoginEvent::RememberToggled => self.remember = !self.remember,
            LoginEvent::Rejected(error) => self.error = Some(error.to_string()),
            LoginEvent::SendRequested => {
                self.pending = Some(PendingRequest::SendingOtp);
                self.error = None;
            }
            LoginEvent::OtpSent { identifier, at } => {
                self.step = LoginStep::OtpSent(OtpChallenge {
                    identifier: identifier.clone(),
                    sent_at: at,
                    verify_attempted_at: None,
                    resend_in: RESEND_COOLDOWN_SECS,
                });
                self.identifier = identifier;
                self.pending = None;
                self.forgot = None;
                self.error = None;
            }
            LoginEvent::SendFailed(message) => {
                self.pending = None;
                self.error = Some(message);
            }
            LoginEvent::Tick => {
                if let LoginStep::OtpSent(challenge) = &mut self.step {
                    challenge.resend_in = challenge.resend_in.saturating_sub(1);
                }
            }
            LoginEvent::VerifyRequested { at } => {
                if let LoginStep::OtpSent(challenge) = &mut self.step {
                    challenge.verify_attempted_at = Some(at);
                    self.pending = Some(PendingRequest::Verifying);
                    self.error = None;
                }
            }
            LoginEvent::LoginFailed(message) => {
                self.pending = None;
                self.error = Some(message);
                // The OTP stays in the field; only "change identifier" clears it.
                if self.is_otp_sent() {
                    self.shake = true;
                }
            }
            LoginEvent::ShakeCleared => self.shake = false,
            LoginEvent::LoginSucceeded => {
                *self = Self {
                    remember: self.remember,
                    ..Self::default()
                };
            }
            LoginEvent::ChangeIdentifier => {
                self.step = LoginStep::AwaitingIdentifier;
                self.otp.clear();
                self.shake = false;
                self.pending = None;
                self.error = None;
            }
            LoginEvent::ForgotOpened => {
                self.forgot.get_or_insert_with(ForgotOverlay::default);
            }
            LoginEvent::ForgotInputChanged(value) => {
                if let Some(overlay) = &mut self.forgot {
                    overlay.identifier = value;
                }
            }
            LoginEvent::ForgotRequested => {
                if let Some(overlay) = &mut self.forgot {
                    overlay.sending = true;
                }
            }
            LoginEvent::ForgotFailed(message) => {
                if let Some(overlay) = &mut self.forgot {
                    overlay.sending = false;
                }
                self.error = Some(message);
            }
            LoginEvent::ForgotClosed => self.forgot = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn sent_to(identifier: &str) -> LoginFlow {
        let mut flow = LoginFlow::new();
        flow.apply(LoginEvent::IdentifierChanged(identifier.to_string()));
        let request = flow.send_otp_request().unwrap();
        flow.apply(LoginEvent::SendRequested);
        flow.apply(LoginEvent::OtpSent {
            identifier: request.email,
            at: at(0),
        });
        flow
    }

    #[test]
    fn test_invalid_identifier_produces_no_request() {
        let mut flow = LoginFlow::new();
        flow.apply(LoginEvent::IdentifierChanged("not-an-email".to_string()));

        let error = flow.send_otp_request().unwrap_err();
        assert_eq!(error, ValidationError::InvalidIdentifier);
        flow.apply(LoginEvent::Rejected(error));

        assert_eq!(flow.step, LoginStep::AwaitingIdentifier);
        assert!(!flow.is_busy());
        assert_eq!(
            flow.error.as_deref(),
            Some("Enter a valid email (with @) or 10-digit phone number.")
        );
    }

    #[test]
    fn test_send_then_countdown_to_resend() {
        let mut flow = LoginFlow::new();
        flow.apply(LoginEvent::IdentifierChanged("alice@example.com".to_string()));
        let request = flow.send_otp_request().unwrap();
        assert_eq!(request.email, "alice@example.com");

        flow.apply(LoginEvent::SendRequested);
        assert_eq!(flow.send_otp_request(), Err(ValidationError::Busy));
        flow.apply(LoginEvent::OtpSent {
            identifier: request.email,
            at: at(0),
        });

        assert_eq!(flow.resend_in(), Some(30));
        assert!(!flow.can_resend());
        for remaining in (0..30).rev() {
            assert_eq!(
                flow.send_otp_request(),
                Err(ValidationError::CooldownActive(remaining + 1))
            );
            flow.apply(LoginEvent::Tick);
            assert_eq!(flow.resend_in(), Some(remaining));
        }
        assert!(!flow.cooldown_active());
        assert!(flow.can_resend());

        flow.apply(LoginEvent::Tick);
        assert_eq!(flow.resend_in(), Some(0));

        let resend = flow.send_otp_request().unwrap();
        assert_eq!(resend.email, "alice@example.com");
        flow.apply(LoginEvent::SendRequested);
        flow.apply(LoginEvent::OtpSent {
            identifier: resend.email,
            at: at(31),
        });
        assert_eq!(flow.resend_in(), Some(30));
    }

    #[test]
    fn test_phone_identifier_is_sent_as_email_field() {
        let mut flow = sent_to("9876543210");
        flow.apply(LoginEvent::OtpChanged("123456".to_string()));
        assert_eq!(
            flow.login_request().unwrap(),
            LoginRequest {
                email: "9876543210".to_string(),
                otp: "123456".to_string(),
            }
        );
    }

    #[test]
    fn test_rejected_otp_shakes_and_stays() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::OtpChanged("123456".to_string()));
        flow.login_request().unwrap();
        flow.apply(LoginEvent::VerifyRequested { at: at(5) });
        assert_eq!(flow.pending, Some(PendingRequest::Verifying));
        assert_eq!(flow.challenge().unwrap().verify_attempted_at, Some(at(5)));

        flow.apply(LoginEvent::LoginFailed("Invalid OTP".to_string()));
        assert!(flow.shake);
        assert!(flow.is_otp_sent());
        assert_eq!(flow.otp, "123456");
        assert!(!flow.is_busy());

        flow.apply(LoginEvent::ShakeCleared);
        assert!(!flow.shake);
        assert!(flow.is_otp_sent());
    }

    #[test]
    fn test_login_requires_otp_and_challenge() {
        let flow = LoginFlow::new();
        assert_eq!(flow.login_request(), Err(ValidationError::NoPendingChallenge));

        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::OtpChanged("   ".to_string()));
        assert_eq!(flow.login_request(), Err(ValidationError::EmptyOtp));
    }

    #[test]
    fn test_change_identifier_discards_challenge() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::OtpChanged("999999".to_string()));
        flow.apply(LoginEvent::ChangeIdentifier);

        assert_eq!(flow.step, LoginStep::AwaitingIdentifier);
        assert!(flow.otp.is_empty());
        assert_eq!(flow.identifier, "alice@example.com");

        flow.apply(LoginEvent::IdentifierChanged("bob@example.com".to_string()));
        assert_eq!(flow.send_otp_request().unwrap().email, "bob@example.com");
    }

    #[test]
    fn test_identifier_is_locked_while_otp_pending() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::IdentifierChanged("mallory@example.com".to_string()));
        assert_eq!(flow.identifier, "alice@example.com");
    }

    #[test]
    fn test_forgot_otp_replaces_identifier() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::ForgotOpened);
        flow.apply(LoginEvent::ForgotInputChanged("bad".to_string()));
        assert_eq!(
            flow.forgot_request(),
            Err(ValidationError::InvalidResetIdentifier)
        );

        flow.apply(LoginEvent::ForgotInputChanged("9876543210".to_string()));
        let request = flow.forgot_request().unwrap();
        flow.apply(LoginEvent::ForgotRequested);
        assert_eq!(flow.forgot_request(), Err(ValidationError::Busy));

        flow.apply(LoginEvent::OtpSent {
            identifier: request.email,
            at: at(12),
        });
        assert!(flow.forgot.is_none());
        assert_eq!(flow.identifier, "9876543210");
        let challenge = flow.challenge().unwrap();
        assert_eq!(challenge.identifier, "9876543210");
        assert_eq!(challenge.resend_in, RESEND_COOLDOWN_SECS);
        assert_eq!(challenge.sent_at, at(12));
    }

    #[test]
    fn test_forgot_failure_keeps_overlay_open() {
        let mut flow = LoginFlow::new();
        flow.apply(LoginEvent::ForgotOpened);
        flow.apply(LoginEvent::ForgotInputChanged("bob@example.com".to_string()));
        flow.apply(LoginEvent::ForgotRequested);
        flow.apply(LoginEvent::ForgotFailed("Failed to resend OTP.".to_string()));

        let overlay = flow.forgot.as_ref().unwrap();
        assert!(!overlay.sending);
        assert_eq!(overlay.identifier, "bob@example.com");
        assert_eq!(flow.step, LoginStep::AwaitingIdentifier);

        flow.apply(LoginEvent::ForgotClosed);
        assert!(flow.forgot.is_none());
    }

    #[test]
    fn test_success_discards_challenge_but_keeps_remember() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::RememberToggled);
        flow.apply(LoginEvent::OtpChanged("123456".to_string()));
        flow.apply(LoginEvent::VerifyRequested { at: at(3) });
        flow.apply(LoginEvent::LoginSucceeded);

        assert_eq!(
            flow,
            LoginFlow {
                remember: true,
                ..LoginFlow::default()
            }
        );
    }

    #[test]
    fn test_stale_failure_after_change_does_not_shake() {
        let mut flow = sent_to("alice@example.com");
        flow.apply(LoginEvent::VerifyRequested { at: at(1) });
        flow.apply(LoginEvent::ChangeIdentifier);
        flow.apply(LoginEvent::LoginFailed("Invalid OTP".to_string()));

        assert!(!flow.shake);
        assert_eq!(flow.step, LoginStep::AwaitingIdentifier);
    }
}
