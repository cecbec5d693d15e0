//! Inbound request parsing and identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Map path format and query parameters onto a `FetchRequest`
//! - Resolve the outbound method and POST data

use axum::http::{HeaderValue, Method, Request};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::relay::request::{FetchRequest, OutputMode};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Assigns `x-request-id` to requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRelayRequestId;

impl MakeRequestId for MakeRelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Query parameters accepted on every relay route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayParams {
    pub url: Option<String>,
    pub charset: Option<String>,
    pub callback: Option<String>,
    #[serde(rename = "requestMethod")]
    pub request_method: Option<String>,
}

/// Method sent upstream: `requestMethod` if given, else the inbound method.
/// Only GET, HEAD and POST are relayed; anything else becomes GET.
pub fn resolve_method(inbound: &Method, requested: Option<&str>) -> Method {
    let name = match requested.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_ascii_uppercase(),
        None => inbound.as_str().to_ascii_uppercase(),
    };

    match name.as_str() {
        "HEAD" => Method::HEAD,
        "POST" => Method::POST,
        _ => Method::GET,
    }
}

/// JSON object carried by a POST body, if any.
pub fn parse_data(method: &Method, body: &[u8]) -> Result<Option<Map<String, Value>>, ApiError> {
    if *method != Method::POST || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(ApiError::InvalidBody)
}

/// Build the relay call for `/{format}` from the inbound request parts.
pub fn build_request(
    format: &str,
    inbound: &Method,
    params: &RelayParams,
    body: &[u8],
) -> Result<FetchRequest, ApiError> {
    let mode: OutputMode = format.parse()?;

    let url = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let method = resolve_method(inbound, params.request_method.as_deref());
    let data = parse_data(&method, body)?;

    let mut request = FetchRequest::new(url, mode).with_method(method);
    if let Some(charset) = params.charset.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        request = request.with_charset(charset);
    }
    if let Some(data) = data {
        request = request.with_data(data);
    }
    Ok(request)
}
