//! REST Proxy Bindings
//!
//! Frontend fetch wrappers for the proxy endpoints, organized by resource.

mod events;
mod challenges;
mod organizations;
mod registration;

use std::fmt;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

// Re-export all public items
pub use events::*;
pub use challenges::*;
pub use organizations::*;
pub use registration::*;

/// Failures surfaced by the proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response
    Status(u16),
    /// Request never completed (network, CORS, no window)
    Network(String),
    /// Body did not match the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(code) => write!(f, "request failed with status {}", code),
            ApiError::Network(msg) => write!(f, "request did not complete: {}", msg),
            ApiError::Decode(msg) => write!(f, "unexpected response shape: {}", msg),
        }
    }
}

/// Proxy base URL. The host page can override via `window.__HACKHUB_API__`.
fn api_base() -> String {
    web_sys::window()
        .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str("__HACKHUB_API__")).ok())
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "/api".to_string())
}

fn json_headers() -> Result<web_sys::Headers, ApiError> {
    let headers = web_sys::Headers::new()
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    headers
        .append("Accept", "application/json")
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    headers
        .append("Content-Type", "application/json")
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    Ok(headers)
}

async fn send(request: web_sys::Request) -> Result<JsValue, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }

    let body = resp.json().map_err(|e| ApiError::Decode(format!("{:?}", e)))?;
    JsFuture::from(body)
        .await
        .map_err(|e| ApiError::Decode(format!("{:?}", e)))
}

async fn get_json(path: &str) -> Result<JsValue, ApiError> {
    let opts = web_sys::RequestInit::new();
    opts.set_method("GET");
    opts.set_headers(&json_headers()?.into());

    let url = format!("{}{}", api_base(), path);
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    send(request).await
}

pub(crate) async fn post_json(path: &str, body: &impl serde::Serialize) -> Result<JsValue, ApiError> {
    let payload = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(&json_headers()?.into());
    opts.set_body(&JsValue::from_str(&payload));

    let url = format!("{}{}", api_base(), path);
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    send(request).await
}

/// GET a collection. The proxy is inconsistent about singleton results
/// (bare object vs one-element list), so a non-array body is wrapped.
pub(crate) async fn fetch_collection<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    let json = get_json(path).await?;
    if js_sys::Array::is_array(&json) {
        serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        let single: T =
            serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(vec![single])
    }
}
