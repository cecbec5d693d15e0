//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Define the client seam (`UpstreamClient`) used by the fetcher
//! - Send outbound requests with optional automatic decompression
//! - Buffer the full response body
//! - Report 4xx/5xx responses as errors, keeping the response

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Method;
use std::future::Future;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::relay::error::UpstreamError;

/// A fully built request to the upstream server.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub method: Method,
    /// Ask for and transparently decode compressed bodies.
    pub decompress: bool,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status line and headers of an upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// Final URL, after redirects.
    pub url: String,
    pub status: u16,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn content_type(&self) -> Option<String> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Declared `content-length`, or -1 when absent or unparseable.
    pub fn declared_length(&self) -> i64 {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|len| *len >= 0)
            .unwrap_or(-1)
    }
}

/// An upstream response with its buffered body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

/// HTTP client capability the fetcher relies on.
///
/// Implementations return `UpstreamError::Status` for 4xx/5xx responses and
/// `UpstreamError::Transport` when no response could be obtained.
pub trait UpstreamClient: Send + Sync {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, UpstreamError>> + Send;
}

/// Production client built on `reqwest`.
///
/// Decompression is a client-level setting in reqwest, so two clients are
/// kept: one that negotiates and decodes compression and one that does not.
#[derive(Debug, Clone)]
pub struct HttpClient {
    decoding: reqwest::Client,
    raw: reqwest::Client,
}

impl HttpClient {
    /// Build both clients from the upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let builder = || {
            let mut builder = reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .redirect(Policy::limited(config.max_redirects));
            if let Some(secs) = config.connect_timeout_secs {
                builder = builder.connect_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = config.timeout_secs {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            if !config.system_proxy {
                builder = builder.no_proxy();
            }
            builder
        };

        Ok(Self {
            decoding: builder().build()?,
            raw: builder().no_gzip().no_brotli().no_deflate().build()?,
        })
    }
}

impl UpstreamClient for HttpClient {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        let client = if request.decompress {
            &self.decoding
        } else {
            &self.raw
        };

        let mut builder = client
            .request(request.method, request.url.as_str())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let meta = ResponseMeta {
            url: response.url().to_string(),
            status: status.as_u16(),
            headers: response.headers().clone(),
        };
        let body = response.bytes().await?.to_vec();

        let response = UpstreamResponse { meta, body };
        if status.is_client_error() || status.is_server_error() {
            return Err(UpstreamError::Status(response));
        }
        Ok(response)
    }
}
