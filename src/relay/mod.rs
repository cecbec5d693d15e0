//! Relay core: mode selection, upstream fetch and result shaping.
//!
//! # Data Flow
//! ```text
//! FetchRequest
//!     → dispatcher.rs (pick info / raw / contents strategy)
//!     → fetcher.rs (build outbound request, send via client.rs)
//!     → charset.rs (optional transcoding of the body)
//!     → result.rs (FetchResult success variant)
//!
//! Upstream failure (transport or 4xx/5xx):
//!     client.rs → UpstreamError
//!     → fetcher::normalize
//!     → FetchResult::Error
//! ```
//!
//! # Design Decisions
//! - Stateless per call; the only shared resource is the HTTP client
//! - `dispatch` never fails: the fetcher is the single error boundary
//! - Unknown charsets degrade to byte passthrough instead of erroring

pub mod charset;
pub mod client;
pub mod content;
pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod request;
pub mod result;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, OutboundRequest, ResponseMeta, UpstreamClient, UpstreamResponse};
pub use content::Content;
pub use dispatcher::Dispatcher;
pub use error::{TransportErrorKind, TransportFailure, UpstreamError};
pub use fetcher::Fetcher;
pub use request::{FetchRequest, OutputMode};
pub use result::{ContentsStatus, ErrorPage, ErrorStatus, FetchResult, PageContents, PageInfo, RawPage};
