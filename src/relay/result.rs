//! Relay result shapes.
//!
//! The enum variant is the discriminant. On the wire each variant is
//! serialized without a tag, using the field names relay clients expect
//! (`http_code`, `content_length`, `contentType`, ...).

use serde::Serialize;

use crate::relay::content::Content;
use crate::relay::error::TransportFailure;

/// Outcome of a single relay call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FetchResult {
    Info(PageInfo),
    Raw(RawPage),
    Contents(PageContents),
    Error(ErrorPage),
}

impl FetchResult {
    /// Upstream status code, when one was received.
    pub fn http_code(&self) -> Option<u16> {
        match self {
            FetchResult::Info(info) => Some(info.http_code),
            FetchResult::Raw(_) => None,
            FetchResult::Contents(page) => Some(page.status.http_code),
            FetchResult::Error(page) => page.status.http_code,
        }
    }

    /// Label used for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            FetchResult::Error(page) if page.status.error.is_some() => "transport_error",
            FetchResult::Error(_) => "upstream_error",
            _ => "success",
        }
    }
}

/// Metadata from a HEAD request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    pub url: String,
    /// Always empty.
    pub content: String,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Declared length, -1 when unknown.
    #[serde(rename = "contentLength")]
    pub content_length: i64,
    pub http_code: u16,
}

/// Body passed through untouched (or transcoded, if a charset was given).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPage {
    pub content: Content,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Exact byte length of `content`.
    #[serde(rename = "contentLength")]
    pub content_length: usize,
}

/// Body as text plus status metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContents {
    pub contents: String,
    pub status: ContentsStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentsStatus {
    pub url: String,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Byte length of the body as received, before charset decoding.
    pub content_length: usize,
    pub http_code: u16,
}

/// Normalized upstream failure.
///
/// Transport failures carry only `status.error`. Failure responses carry
/// the body and the same status fields as `PageContents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPage {
    pub contents: Option<String>,
    pub status: ErrorStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TransportFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::error::TransportErrorKind;
    use serde_json::json;

    #[test]
    fn test_info_wire_shape() {
        let result = FetchResult::Info(PageInfo {
            url: "http://example.com".into(),
            content: String::new(),
            content_type: Some("text/html".into()),
            content_length: 1234,
            http_code: 200,
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "url": "http://example.com",
                "content": "",
                "contentType": "text/html",
                "contentLength": 1234,
                "http_code": 200,
            })
        );
        assert_eq!(result.outcome(), "success");
    }

    #[test]
    fn test_transport_error_wire_shape() {
        let result = FetchResult::Error(ErrorPage {
            contents: None,
            status: ErrorStatus {
                error: Some(TransportFailure::new(TransportErrorKind::Connect, "refused")),
                ..Default::default()
            },
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "contents": null,
                "status": { "error": { "kind": "connect", "message": "refused" } },
            })
        );
        assert_eq!(result.http_code(), None);
        assert_eq!(result.outcome(), "transport_error");
    }

    #[test]
    fn test_contents_wire_shape() {
        let result = FetchResult::Contents(PageContents {
            contents: "hello".into(),
            status: ContentsStatus {
                url: "http://example.com/a".into(),
                content_type: None,
                content_length: 5,
                http_code: 200,
            },
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "contents": "hello",
                "status": { "url": "http://example.com/a", "content_length": 5, "http_code": 200 },
            })
        );
    }
}
