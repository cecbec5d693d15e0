//! Output mode selection.
//!
//! # Selection (first match wins)
//! 1. `info` mode or a HEAD request → HEAD the URL, report metadata
//! 2. `raw` mode → fetch without decompression, pass the body through
//! 3. otherwise → fetch, return the body as text with status metadata
//!
//! Only the raw strategy forwards `data` and custom headers.

use crate::relay::client::UpstreamClient;
use crate::relay::fetcher::{normalize, FetchOptions, Fetcher};
use crate::relay::request::{FetchRequest, OutputMode};
use crate::relay::result::{ContentsStatus, FetchResult, PageContents, PageInfo, RawPage};

/// Entry point of the relay core.
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    fetcher: Fetcher<C>,
}

impl<C: UpstreamClient> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            fetcher: Fetcher::new(client),
        }
    }

    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    /// Serve one relay request. Upstream failures come back as
    /// `FetchResult::Error`; this never fails.
    pub async fn dispatch(&self, req: FetchRequest) -> FetchResult {
        match req.effective_mode() {
            OutputMode::Info => self.page_info(&req.url).await,
            OutputMode::Raw => self.raw_page(&req).await,
            OutputMode::Contents => self.page_contents(&req).await,
        }
    }

    async fn page_info(&self, url: &str) -> FetchResult {
        match self.fetcher.fetch_head(url).await {
            Ok(meta) => FetchResult::Info(PageInfo {
                url: url.to_string(),
                content: String::new(),
                content_type: meta.content_type(),
                content_length: meta.declared_length(),
                http_code: meta.status,
            }),
            Err(e) => normalize(e),
        }
    }

    async fn raw_page(&self, req: &FetchRequest) -> FetchResult {
        let options = FetchOptions {
            method: req.method.clone(),
            raw: true,
            charset: req.charset.as_deref(),
            data: req.data.as_ref(),
            headers: Some(&req.headers),
        };

        match self.fetcher.fetch(&req.url, options).await {
            Ok(decoded) => FetchResult::Raw(RawPage {
                content_type: decoded.meta.content_type(),
                content_length: decoded.content.byte_len(),
                content: decoded.content,
            }),
            Err(e) => normalize(e),
        }
    }

    async fn page_contents(&self, req: &FetchRequest) -> FetchResult {
        let options = FetchOptions {
            charset: req.charset.as_deref(),
            ..FetchOptions::new(req.method.clone())
        };

        match self.fetcher.fetch(&req.url, options).await {
            Ok(decoded) => FetchResult::Contents(PageContents {
                status: ContentsStatus {
                    url: req.url.clone(),
                    content_type: decoded.meta.content_type(),
                    content_length: decoded.body_len,
                    http_code: decoded.meta.status,
                },
                contents: decoded.content.into_text(),
            }),
            Err(e) => normalize(e),
        }
    }
}
