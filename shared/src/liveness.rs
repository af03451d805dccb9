use crate::api::HelloResponse;
use crate::error::AppError;

pub const UNREACHABLE_MESSAGE: &str = "Backend not reachable";

/// Result of the `/hello` probe shown under the navbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendStatus {
    #[default]
    Checking,
    Reachable(String),
    Unreachable,
}

impl BackendStatus {
    /// Any failure, including a malformed body, counts as unreachable.
    pub fn from_probe(result: Result<HelloResponse, AppError>) -> Self {
        match result {
            Ok(hello) => Self::Reachable(hello.message),
            Err(err) => {
                tracing::warn!("backend liveness probe failed: {err}");
                Self::Unreachable
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Checking => "Checking backend...".to_string(),
            Self::Reachable(message) => format!("Backend: {message}"),
            Self::Unreachable => format!("Backend: {UNREACHABLE_MESSAGE}"),
        }
    }
}
