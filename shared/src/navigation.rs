use std::fmt;

use crate::models::UserRef;

/// Where non-admin users land after login when no destination was captured.
pub const DEFAULT_DESTINATION: &str = "/services";

/// Paths the auth logic navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppPath {
    Home,
    Login,
    Services,
    Dashboard,
    Admin,
    /// A destination captured before a login redirect.
    Other(String),
}

impl AppPath {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Services => DEFAULT_DESTINATION,
            Self::Dashboard => "/dashboard",
            Self::Admin => "/admin",
            Self::Other(path) => path,
        }
    }

    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "" => Self::Home,
            "/login" => Self::Login,
            "/services" => Self::Services,
            "/dashboard" => Self::Dashboard,
            "/admin" => Self::Admin,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination after a successful login. Admins always go to the admin
/// view; everyone else returns to where they were headed, or the services
/// page. Only same-origin paths are honored, and never the login page itself.
pub fn post_login_destination(user: &UserRef, captured: Option<&str>) -> AppPath {
    if user.role.is_admin() {
        return AppPath::Admin;
    }

    captured
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .map(AppPath::from_path)
        .filter(|path| *path != AppPath::Login)
        .unwrap_or(AppPath::Services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::tests::user;

    #[test]
    fn test_admin_ignores_captured_destination() {
        let admin = user("admin@laundry.com", Role::Admin);
        assert_eq!(post_login_destination(&admin, Some("/dashboard")), AppPath::Admin);
        assert_eq!(post_login_destination(&admin, None), AppPath::Admin);
    }

    #[test]
    fn test_user_returns_to_captured_destination() {
        let alice = user("alice@example.com", Role::User);
        assert_eq!(
            post_login_destination(&alice, Some("/dashboard")),
            AppPath::Dashboard
        );
        assert_eq!(
            post_login_destination(&alice, Some("/services/wash-fold")),
            AppPath::Other("/services/wash-fold".to_string())
        );
    }

    #[test]
    fn test_user_defaults_to_services() {
        let alice = user("alice@example.com", Role::User);
        assert_eq!(post_login_destination(&alice, None), AppPath::Services);
        assert_eq!(post_login_destination(&alice, Some("/login")), AppPath::Services);
        assert_eq!(
            post_login_destination(&alice, Some("https://evil.example")),
            AppPath::Services
        );
        assert_eq!(
            post_login_destination(&alice, Some("//evil.example")),
            AppPath::Services
        );
    }

    #[test]
    fn test_path_round_trip() {
        for path in ["/", "/login", "/services", "/dashboard", "/admin", "/cart"] {
            assert_eq!(AppPath::from_path(path).as_str(), path);
        }
    }
}
