//! HTTP client for the laundry backend. Every call carries an abort timeout
//! and browser cookies; calls made on behalf of a signed-in user take their
//! [`Credentials`] explicitly, so nothing authorizes a request by default.

use gloo::timers::callback::Timeout;
use gloo_net::http::{Request, RequestBuilder, Response};
use laundry_shared::api::{
    AdminOrder, HelloResponse, LoginRequest, LoginResponse, MyOrder, SendOtpRequest,
    ADMIN_ORDERS_PATH, HELLO_PATH, LOGIN_PATH, MY_ORDERS_PATH, SEND_OTP_PATH,
};
use laundry_shared::auth::AuthApi;
use laundry_shared::config::AppConfig;
use laundry_shared::session::Credentials;
use laundry_shared::AppError;
use serde::{de::DeserializeOwned, Serialize};
use web_sys::{AbortController, AbortSignal, RequestCredentials};

use crate::services::config;

const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiService {
    config: AppConfig,
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiService {
    pub fn new() -> Self {
        Self {
            config: config::load(),
        }
    }

    pub fn google_auth_url(&self) -> &str {
        &self.config.google_auth_url
    }

    pub async fn hello(&self) -> Result<HelloResponse, AppError> {
        self.get_json(HELLO_PATH, None).await
    }

    pub async fn my_orders(&self, credentials: &Credentials) -> Result<Vec<MyOrder>, AppError> {
        self.get_json(MY_ORDERS_PATH, Some(credentials)).await
    }

    pub async fn admin_orders(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<AdminOrder>, AppError> {
        self.get_json(ADMIN_ORDERS_PATH, Some(credentials)).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        credentials: Option<&Credentials>,
    ) -> Result<T, AppError> {
        let url = self.config.url(path);
        let response = send_with_timeout(|signal| {
            authorize(Request::get(&url), credentials)
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        handle_json_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.config.url(path);
        let response = send_with_timeout(|signal| {
            authorize(Request::post(&url), None)
                .abort_signal(Some(signal))
                .json(body)
                .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
        })
        .await?;

        handle_json_response(response).await
    }
}

impl AuthApi for ApiService {
    async fn send_otp(&self, request: &SendOtpRequest) -> Result<(), AppError> {
        let url = self.config.url(SEND_OTP_PATH);
        let response = send_with_timeout(|signal| {
            authorize(Request::post(&url), None)
                .abort_signal(Some(signal))
                .json(request)
                .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
        })
        .await?;

        handle_empty_response(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.post_json(LOGIN_PATH, request).await
    }
}

fn authorize(builder: RequestBuilder, credentials: Option<&Credentials>) -> RequestBuilder {
    let builder = builder.credentials(RequestCredentials::Include);
    match credentials {
        Some(credentials) => builder.header("Authorization", &credentials.header_value()),
        None => builder,
    }
}

fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request that aborts after [`DEFAULT_TIMEOUT_MS`].
async fn send_with_timeout(
    build_request: impl FnOnce(&AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status, url = %response.url(), "request failed");
    AppError::from_http(status, &body)
}
