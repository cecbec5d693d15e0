//! In-memory upstream client for unit tests.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Mutex;

use crate::relay::client::{OutboundRequest, ResponseMeta, UpstreamClient, UpstreamResponse};
use crate::relay::error::{TransportFailure, UpstreamError};

/// Build a response from `http://upstream.test/`.
pub(crate) fn response(status: u16, content_type: Option<&'static str>, body: Vec<u8>) -> UpstreamResponse {
    let mut headers = HeaderMap::new();
    if let Some(ct) = content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
    }
    UpstreamResponse {
        meta: ResponseMeta {
            url: "http://upstream.test/".to_string(),
            status,
            headers,
        },
        body,
    }
}

enum Reply {
    Ok(UpstreamResponse),
    Status(UpstreamResponse),
    Transport(TransportFailure),
}

/// Returns a canned reply and records every request it is asked to send.
pub(crate) struct RecordingClient {
    reply: Reply,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RecordingClient {
    pub(crate) fn returning(result: Result<UpstreamResponse, UpstreamError>) -> Self {
        let reply = match result {
            Ok(response) => Reply::Ok(response),
            Err(UpstreamError::Status(response)) => Reply::Status(response),
            Err(UpstreamError::Transport(failure)) => Reply::Transport(failure),
        };
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl UpstreamClient for RecordingClient {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Ok(response) => Ok(response.clone()),
            Reply::Status(response) => Err(UpstreamError::Status(response.clone())),
            Reply::Transport(failure) => Err(UpstreamError::Transport(failure.clone())),
        }
    }
}
