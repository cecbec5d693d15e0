//! Relay request definitions.

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Which shape of result the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// HEAD-only metadata.
    Info,
    /// Byte-exact passthrough of the body.
    Raw,
    /// Body as text, wrapped with status metadata.
    #[default]
    Contents,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Info => "info",
            OutputMode::Raw => "raw",
            OutputMode::Contents => "contents",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputMode {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(OutputMode::Info),
            "raw" => Ok(OutputMode::Raw),
            "get" | "json" => Ok(OutputMode::Contents),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// A single relay call.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Absolute target URL.
    pub url: String,
    pub mode: OutputMode,
    pub method: Method,
    /// Encoding the upstream body should be transcoded from.
    pub charset: Option<String>,
    /// JSON body fields, sent only for non-empty POST requests.
    pub data: Option<Map<String, Value>>,
    /// Extra outbound headers, honored by raw mode.
    pub headers: HeaderMap,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, mode: OutputMode) -> Self {
        Self {
            url: url.into(),
            mode,
            method: Method::GET,
            charset: None,
            data: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The mode actually served. HEAD requests always get metadata only.
    pub fn effective_mode(&self) -> OutputMode {
        if self.method == Method::HEAD {
            OutputMode::Info
        } else {
            self.mode
        }
    }
}
