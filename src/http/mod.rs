//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, path format + query → FetchRequest)
//!     → relay::Dispatcher (upstream call)
//!     → response.rs (raw passthrough, JSON or JSONP)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{RelayParams, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
