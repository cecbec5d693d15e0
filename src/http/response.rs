//! Rendering relay results for HTTP clients.
//!
//! # Responsibilities
//! - Send raw pages byte-for-byte with upstream Content-Type
//! - Serialize every other result as JSON with `response_time`
//! - Wrap JSON as JSONP when a callback is requested
//!
//! # Design Decisions
//! - Relay results always answer 200; callers read `http_code`
//! - JSON is always UTF-8 since bodies are transcoded before rendering

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::time::Duration;

use crate::relay::result::{FetchResult, RawPage};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const JSONP_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";

/// Turn a relay result into the HTTP response sent to the caller.
pub fn render(result: FetchResult, callback: Option<&str>, elapsed: Duration) -> Response {
    match result {
        FetchResult::Raw(page) => raw_response(page),
        other => json_response(&other, callback, elapsed),
    }
}

fn raw_response(page: RawPage) -> Response {
    let content_type = page
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok());

    let mut response = Response::new(Body::from(page.content.into_bytes()));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(page.content_length));
    if let Some(ct) = content_type {
        headers.insert(header::CONTENT_TYPE, ct);
    }
    response
}

fn json_response(result: &FetchResult, callback: Option<&str>, elapsed: Duration) -> Response {
    let mut value = match serde_json::to_value(result) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize relay result");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    insert_response_time(&mut value, elapsed);

    let json = value.to_string();
    let (body, content_type) = match callback.and_then(sanitize_callback) {
        Some(name) => (jsonp(&name, &json), JSONP_CONTENT_TYPE),
        None => (json, JSON_CONTENT_TYPE),
    };

    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Add `response_time` (ms) to `status`, or to the top level when there is none.
fn insert_response_time(value: &mut Value, elapsed: Duration) {
    let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    if let Some(status) = value.get_mut("status").and_then(Value::as_object_mut) {
        status.insert("response_time".to_string(), millis.into());
    } else if let Some(object) = value.as_object_mut() {
        object.insert("response_time".to_string(), millis.into());
    }
}

/// Keep only characters valid in a JS member expression: `[A-Za-z0-9_$.[]]`.
pub fn sanitize_callback(callback: &str) -> Option<String> {
    let name: String = callback
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '[' | ']'))
        .collect();
    (!name.is_empty()).then_some(name)
}

fn jsonp(callback: &str, json: &str) -> String {
    // U+2028/U+2029 are valid in JSON strings but end a line in JavaScript
    let json = json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029");
    format!("/**/ typeof {cb} === 'function' && {cb}({json});", cb = callback, json = json)
}
