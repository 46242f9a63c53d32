//! JSON requests against the employee service.
//!
//! Every response is wrapped in the backend envelope
//! (`{ success, message, data }`). Timeouts and retries are the query
//! client's job; these functions perform exactly one request.

use serde::de::{DeserializeOwned, IgnoredAny};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::core::error::FetchError;
use crate::models::ApiResponse;
use crate::utils::dom;

/// HTTP methods used by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// Send a request and unwrap the envelope's payload.
pub async fn fetch_api<T: DeserializeOwned>(
    method: Method,
    url: &str,
    body: Option<&str>,
) -> Result<T, FetchError> {
    let (status, text) = send(method, url, body).await?;
    decode_envelope::<T>(status, &text)?.into_data(status)
}

/// Send a request whose payload is irrelevant (e.g. `DELETE`).
pub async fn fetch_api_unit(
    method: Method,
    url: &str,
    body: Option<&str>,
) -> Result<(), FetchError> {
    let (status, text) = send(method, url, body).await?;
    decode_envelope::<IgnoredAny>(status, &text)?.into_unit(status)
}

/// Perform the request, returning the status code and raw body.
async fn send(method: Method, url: &str, body: Option<&str>) -> Result<(u16, String), FetchError> {
    let window = dom::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|_| FetchError::RequestCreationFailed)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| FetchError::RequestCreationFailed)?;
    }

    log::debug!("{} {}", method.as_str(), url);
    let result = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Network(js_error_message(&e)))?;
    let resp: Response = result
        .dyn_into()
        .map_err(|_| FetchError::ResponseReadFailed)?;

    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;

    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown error".to_string())
}

// =============================================================================
// Envelope Decoding
// =============================================================================

/// Interpret a response body.
///
/// Error statuses carrying an envelope become [`FetchError::Api`] with the
/// backend's message; anything else unreadable becomes [`FetchError::Http`].
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<ApiResponse<T>, FetchError> {
    let ok = (200..300).contains(&status);

    if !ok {
        return match serde_json::from_str::<ApiResponse<IgnoredAny>>(body) {
            Ok(envelope) if !envelope.message.is_empty() => Err(FetchError::Api {
                status,
                message: envelope.message,
            }),
            _ => Err(FetchError::Http(status)),
        };
    }

    if body.trim().is_empty() {
        return Ok(ApiResponse {
            success: true,
            message: String::new(),
            data: None,
        });
    }

    serde_json::from_str(body).map_err(|e| FetchError::JsonParse(e.to_string()))
}
