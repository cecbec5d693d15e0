//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay handler
//! - Wire up middleware (request ID, tracing, CORS headers, timeout, body limit)
//! - Translate inbound requests into relay calls
//! - Record metrics and render results
//! - Serve with graceful shutdown

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{build_request, MakeRelayRequestId, RelayParams, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::relay::{Dispatcher, HttpClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher<HttpClient>>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = HttpClient::from_config(&config.upstream)?;
        let state = AppState {
            dispatcher: Arc::new(Dispatcher::new(client)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/{format}", any(relay_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRelayRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(x_request_id))
                    .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                    .layer(cors_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"))
                    .layer(cors_header(
                        header::ACCESS_CONTROL_ALLOW_METHODS,
                        "OPTIONS, GET, POST, PATCH, PUT, DELETE",
                    ))
                    .layer(cors_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Permissive CORS header set on every response.
fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Relay handler for `/{format}`.
async fn relay_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
    method: Method,
    Query(params): Query<RelayParams>,
    body: Bytes,
) -> Response {
    // CORS preflight never reaches upstream
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let start = Instant::now();
    let request = match build_request(&format, &method, &params, &body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(format = %format, error = %e, "Rejected relay request");
            return e.into_response();
        }
    };

    let mode = request.effective_mode().as_str();
    let url = request.url.clone();
    tracing::debug!(
        url = %url,
        mode = mode,
        method = %request.method,
        charset = ?request.charset,
        "Relaying request"
    );

    let result = state.dispatcher.dispatch(request).await;

    metrics::record_request(mode, result.outcome(), start);
    tracing::info!(
        url = %url,
        mode = mode,
        http_code = ?result.http_code(),
        outcome = result.outcome(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Relay complete"
    );

    response::render(result, params.callback.as_deref(), start.elapsed())
}
