//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the todo routes and health endpoint
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting on shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::TodoBackend;
use crate::config::GatewayConfig;
use crate::http::middleware::track_requests;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::todo;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn TodoBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn TodoBackend>) -> Self {
        Self { backend }
    }
}

/// HTTP server for the todo gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by `backend`.
    pub fn new(config: GatewayConfig, backend: Arc<dyn TodoBackend>) -> Self {
        let router = Self::build_router(&config, AppState::new(backend));
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let todos = todo::routes::router();
        let prefix = config.http.route_prefix.as_str();

        let mut router = Router::new()
            .route("/health", get(health))
            .merge(todos.clone());
        if !prefix.is_empty() && prefix != "/" {
            router = router.nest(prefix, todos);
        }

        router
            .layer(axum::middleware::from_fn(track_requests))
            .layer(RequestBodyLimitLayer::new(config.http.max_body_size))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.http.request_timeout_secs,
                    ))),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

fn make_request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}

/// Liveness check. Does not touch the backend.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
