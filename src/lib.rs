//! Cross-origin HTTP relay library.
//!
//! Fetches a target URL on behalf of a caller and returns the upstream
//! response as metadata, raw bytes or decoded text, with upstream failures
//! normalized into the same result shape.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{Dispatcher, FetchRequest, FetchResult, OutputMode};
