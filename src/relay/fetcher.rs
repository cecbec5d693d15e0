//! Upstream fetch and result normalization.
//!
//! # Responsibilities
//! - Build outbound request options (method, Accept, JSON body, decompression)
//! - Send through the `UpstreamClient` and decode the body
//! - Convert every upstream failure into `FetchResult::Error`
//!
//! This is the only place where upstream errors are caught. Callers above
//! it deal exclusively in `FetchResult` values.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

use crate::relay::charset;
use crate::relay::client::{OutboundRequest, ResponseMeta, UpstreamClient, UpstreamResponse};
use crate::relay::content::Content;
use crate::relay::error::{TransportErrorKind, TransportFailure, UpstreamError};
use crate::relay::result::{ErrorPage, ErrorStatus, FetchResult};

/// Headers a caller may not set on the outbound request.
const RESERVED_HEADERS: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "keep-alive",
    "proxy-connection",
    "upgrade",
    "te",
    "trailer",
];

/// Per-call options for [`Fetcher::fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions<'a> {
    pub method: Method,
    /// Skip automatic decompression.
    pub raw: bool,
    pub charset: Option<&'a str>,
    pub data: Option<&'a Map<String, Value>>,
    pub headers: Option<&'a HeaderMap>,
}

impl FetchOptions<'_> {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            raw: false,
            charset: None,
            data: None,
            headers: None,
        }
    }
}

/// A successful response after content processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub meta: ResponseMeta,
    /// Body length as received, before charset decoding.
    pub body_len: usize,
    pub content: Content,
}

/// Build the outbound request for `url`.
///
/// A JSON body is attached only for POST with a non-empty `data` mapping;
/// otherwise `data` is ignored.
pub fn build_outbound(url: &str, options: &FetchOptions<'_>) -> Result<OutboundRequest, TransportFailure> {
    let parsed = Url::parse(url).map_err(|e| TransportFailure::invalid_url(format!("{}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TransportFailure::invalid_url(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

    if let Some(custom) = options.headers {
        for name in custom.keys() {
            if RESERVED_HEADERS.contains(&name.as_str()) {
                continue;
            }
            headers.remove(name);
            for value in custom.get_all(name) {
                headers.append(HeaderName::clone(name), value.clone());
            }
        }
    }

    let mut body = None;
    if let Some(data) = options.data.filter(|d| !d.is_empty()) {
        if options.method == Method::POST {
            let encoded = serde_json::to_vec(data)
                .map_err(|e| TransportFailure::new(TransportErrorKind::Request, e.to_string()))?;
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            body = Some(encoded);
        }
    }

    Ok(OutboundRequest {
        url: parsed.into(),
        method: options.method.clone(),
        decompress: !options.raw,
        headers,
        body,
    })
}

/// Apply optional charset decoding to a response body.
pub fn process_content(response: UpstreamResponse, charset: Option<&str>) -> Decoded {
    let UpstreamResponse { meta, body } = response;
    let body_len = body.len();
    Decoded {
        meta,
        body_len,
        content: charset::decode(body, charset),
    }
}

/// Convert an upstream failure into the uniform error result.
pub fn normalize(error: UpstreamError) -> FetchResult {
    match error {
        UpstreamError::Transport(failure) => FetchResult::Error(ErrorPage {
            contents: None,
            status: ErrorStatus {
                error: Some(failure),
                ..Default::default()
            },
        }),
        UpstreamError::Status(response) => {
            let content_type = response.meta.content_type();
            let content_length = response.body.len();
            FetchResult::Error(ErrorPage {
                contents: Some(Content::Bytes(response.body).into_text()),
                status: ErrorStatus {
                    url: Some(response.meta.url),
                    http_code: Some(response.meta.status),
                    content_type,
                    content_length: Some(content_length),
                    error: None,
                },
            })
        }
    }
}

/// Sends relay requests through an [`UpstreamClient`].
#[derive(Debug, Clone)]
pub struct Fetcher<C> {
    client: C,
}

impl<C: UpstreamClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// HEAD `url` and return only the response metadata.
    pub async fn fetch_head(&self, url: &str) -> Result<ResponseMeta, UpstreamError> {
        let response = self.send(url, &FetchOptions::new(Method::HEAD)).await?;
        Ok(response.meta)
    }

    /// Fetch `url` and decode the body.
    pub async fn fetch(&self, url: &str, options: FetchOptions<'_>) -> Result<Decoded, UpstreamError> {
        let charset = options.charset;
        let response = self.send(url, &options).await?;
        Ok(process_content(response, charset))
    }

    async fn send(&self, url: &str, options: &FetchOptions<'_>) -> Result<UpstreamResponse, UpstreamError> {
        let request = match build_outbound(url, options) {
            Ok(request) => request,
            Err(failure) => {
                tracing::warn!(url = %url, error = %failure, "Rejected upstream URL");
                return Err(failure.into());
            }
        };

        tracing::debug!(
            url = %request.url,
            method = %request.method,
            decompress = request.decompress,
            has_body = request.body.is_some(),
            "Sending upstream request"
        );

        match self.client.send(request).await {
            Ok(response) => Ok(response),
            Err(UpstreamError::Transport(failure)) => {
                tracing::warn!(url = %url, method = %options.method, kind = ?failure.kind, error = %failure, "Upstream request failed");
                Err(UpstreamError::Transport(failure))
            }
            Err(UpstreamError::Status(response)) => {
                tracing::warn!(url = %url, method = %options.method, status = response.meta.status, "Upstream returned failure status");
                Err(UpstreamError::Status(response))
            }
        }
    }
}
