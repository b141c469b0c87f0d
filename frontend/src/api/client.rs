use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::types::{ApiError, ApiResult, ErrorEnvelope};
use crate::config;
use crate::state::session::ACCESS_TOKEN_KEY;
use crate::utils::storage;

/// Shared HTTP entry point for every gateway call. Domain methods live in
/// the sibling modules (`auth`, `organizations`, `users`); each one funnels
/// its response through [`ApiClient::execute`] so all failure modes come out
/// as [`ApiError`] values, never as panics or stray `reqwest` errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::new_with_base_url(config::api_base_url())
    }

    /// Tests and shells point this at their own server.
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the persisted bearer token; never writes. A missing token sends
    /// the request unauthenticated and lets the server answer 401.
    fn bearer_token(&self) -> Option<String> {
        match storage::get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                log::warn!("token storage unavailable: {}", err);
                None
            }
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.put(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.delete(self.url(path)))
    }

    /// Login and register go out without a token.
    pub(crate) fn post_public(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) async fn execute<T>(&self, request: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(&err))?;
        decode(response).await
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        let message = if looks_unreachable(err) {
            format!(
                "Не удалось подключиться к серверу API ({}). Убедитесь, что сервер запущен и доступен.",
                self.base_url
            )
        } else {
            format!("Ошибка сети: {}", err)
        };
        log::error!("request failed: {}", err);
        ApiError::transport(message)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn looks_unreachable(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

#[cfg(target_arch = "wasm32")]
fn looks_unreachable(err: &reqwest::Error) -> bool {
    // fetch() reports an unreachable server as a generic request failure
    err.is_request()
}

/// Outcome mapping shared by every endpoint:
/// non-JSON content type -> "Invalid response", undecodable body ->
/// "Parse error", non-2xx -> the server's `{error, message}` envelope,
/// 2xx -> the decoded payload.
async fn decode<T>(response: Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status().as_u16();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    if !is_json {
        return Err(ApiError::invalid_response(status));
    }

    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|_| ApiError::parse_error(status))
    } else {
        let envelope = response
            .json::<ErrorEnvelope>()
            .await
            .map_err(|_| ApiError::parse_error(status))?;
        Err(ApiError::application(status, envelope))
    }
}
