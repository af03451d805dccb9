//! Backend endpoints. Defaults are baked in at build time; a deployment can
//! repoint a prebuilt bundle through `window.SMART_LAUNDRY_CONFIG`.
//! Everything here ships to the browser, so it must never hold secrets.

use crate::api::GOOGLE_AUTH_PATH;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
/// Name of the global JS object holding runtime overrides.
pub const RUNTIME_CONFIG_GLOBAL: &str = "SMART_LAUNDRY_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub google_auth_url: String,
}

/// Values read from the runtime config object. `None` keeps the default.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub google_auth_url: Option<String>,
}

impl AppConfig {
    /// Config from build-time environment variables only.
    pub fn from_build_env() -> Self {
        let api_base_url = option_env!("LAUNDRY_API_BASE_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let google_auth_url = option_env!("LAUNDRY_GOOGLE_AUTH_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| join_url(&api_base_url, GOOGLE_AUTH_PATH));

        Self {
            api_base_url,
            google_auth_url,
        }
    }

    /// Build-time config with runtime overrides applied.
    pub fn load_with(runtime: Option<RuntimeConfig>) -> Self {
        let mut config = Self::from_build_env();
        if let Some(runtime) = runtime {
            apply_runtime_overrides(&mut config, runtime);
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

/// A new API base also moves the Google endpoint, unless that was given
/// explicitly.
pub fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.google_auth_url = join_url(&value, GOOGLE_AUTH_PATH);
        config.api_base_url = value;
    }
    if let Some(value) = runtime.google_auth_url {
        config.google_auth_url = value;
    }
}

pub fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Joins a base URL and a path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
