use std::sync::OnceLock;

const DEV_API_BASE_URL: &str = "http://localhost:8080";
const PROD_API_BASE_URL: &str = "https://api.qamqorvision.com";

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static DATA_SOURCE: OnceLock<DataSource> = OnceLock::new();

/// Where the institutions repository reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fixtures,
}

fn default_base_url() -> &'static str {
    if cfg!(debug_assertions) {
        DEV_API_BASE_URL
    } else {
        PROD_API_BASE_URL
    }
}

#[cfg(target_arch = "wasm32")]
fn get_from_env_js() -> Option<String> {
    // Expect optional global object: window.__QAMQOR_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__QAMQOR_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    // Try upper and lower case keys
    let val = js_sys::Reflect::get(&obj, &"API_BASE_URL".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &"api_base_url".into()).ok());
    val.and_then(|v| v.as_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_from_env_js() -> Option<String> {
    None
}

/// Pins the base URL before the first [`crate::api::ApiClient`] is built.
/// Ignored once a value has been cached.
pub fn set_api_base_url(url: impl Into<String>) {
    let _ = API_BASE_URL.set(url.into());
}

/// Explicit override, then the deployment global, then the build default
/// (local backend in debug builds, the production gateway otherwise).
pub fn api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let resolved = get_from_env_js().unwrap_or_else(|| default_base_url().to_string());
    let _ = API_BASE_URL.set(resolved.clone());
    resolved
}

/// Selects the fixture dataset instead of the live API. Shells call this
/// once at startup for demo deployments.
pub fn set_data_source(source: DataSource) {
    let _ = DATA_SOURCE.set(source);
}

pub fn data_source() -> DataSource {
    DATA_SOURCE.get().copied().unwrap_or(DataSource::Live)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;

    // No test may set the globals: OnceLock state is shared across the
    // whole test binary.

    #[test]
    fn data_source_defaults_to_live() {
        assert_eq!(data_source(), DataSource::Live);
    }

    #[test]
    fn base_url_resolves_to_a_http_endpoint() {
        let url = api_base_url();
        assert!(url.starts_with("http"));
        assert!(!url.ends_with('/'));
    }
}
