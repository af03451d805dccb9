use crate::models::Role;
use crate::navigation::AppPath;
use crate::session::Session;

/// Outcome of checking a protected route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Navigate away, replacing the current history entry.
    Redirect(AppPath),
}

/// Decides whether a protected route may render.
///
/// Anonymous visitors go to the login page; signed-in users lacking the
/// required role go home. Role mismatches are silent.
pub fn evaluate(session: &Session, required_role: Option<&Role>) -> GuardDecision {
    let Some(user) = session.current_user() else {
        return GuardDecision::Redirect(AppPath::Login);
    };

    match required_role {
        Some(role) if &user.role != role => GuardDecision::Redirect(AppPath::Home),
        _ => GuardDecision::Render,
    }
}
