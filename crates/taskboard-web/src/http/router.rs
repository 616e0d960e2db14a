//! Router construction and server host for the front end.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::Request, middleware, routing::get};
use taskboard_config::ConfigurationRecord;
use taskboard_telemetry::{Metrics, build_sha};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, warn};

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::handlers::{dashboard, health, landing, metrics, not_found, public_config};
use crate::http::redirect::apply_redirects;
use crate::http::telemetry::{count_requests, request_id};
use crate::state::ApiState;

/// Axum router wrapper that hosts the Taskboard front end.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router around an already-resolved configuration record.
    #[must_use]
    pub fn new(config: Arc<ConfigurationRecord>, telemetry: Metrics) -> Self {
        let state = Arc::new(ApiState::new(config, telemetry));
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let outer = ServiceBuilder::new()
            .layer(taskboard_telemetry::set_request_id_layer())
            .layer(taskboard_telemetry::propagate_request_id_layer())
            .layer(trace_layer);

        let router = Self::routes()
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                count_requests,
            ))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                apply_redirects,
            ))
            .layer(outer)
            .with_state(state);

        Self { router }
    }

    fn routes() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/", get(landing))
            .route("/dashboard", get(dashboard))
            .route("/health", get(health))
            .route("/config/public", get(public_config))
            .route("/metrics", get(metrics))
            .fallback(not_found)
    }

    /// Clone of the fully layered router, for embedding or in-process tests.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind `addr` and serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the server stops
    /// with an IO failure.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "front-end host listening");
        self.serve_listener(listener, shutdown_signal()).await
    }

    /// Serve on an existing listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the server stops with an IO failure.
    pub async fn serve_listener<F>(self, listener: TcpListener, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
