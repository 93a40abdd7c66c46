//! Router construction and server host for the comparison service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::Request,
    middleware,
    routing::{get, post},
};
use juxta_telemetry::{Metrics, build_sha};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::compare::{clear_comparison, comparison_snapshot, update_comparison};
use crate::http::constants::HEADER_REQUEST_ID;
use crate::http::health::{health, metrics, not_found};
use crate::http::telemetry::record_http_request;
use crate::session::SharedSessions;
use crate::state::ApiState;

/// Axum router wrapper that hosts the comparison endpoints.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct a server backed by the supplied session store.
    #[must_use]
    pub fn new(sessions: SharedSessions, telemetry: Metrics) -> Self {
        let state = Arc::new(ApiState::new(sessions, telemetry));
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();

                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
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
        // Set must wrap propagate so generated ids reach the response.
        let layered = ServiceBuilder::new()
            .layer(juxta_telemetry::set_request_id_layer())
            .layer(juxta_telemetry::propagate_request_id_layer())
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                record_http_request,
            ));

        let router = Self::routes()
            .fallback(not_found)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn routes() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route("/comparison/update/{action}", post(update_comparison))
            .route("/comparison/clear", post(clear_comparison))
            .route("/comparison/snapshot.json", get(comparison_snapshot))
    }

    /// Consume the server and hand out the configured router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the supplied address and serve until the server stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the server terminates unexpectedly.
    pub async fn serve_on(self, listener: TcpListener) -> ApiServerResult<()> {
        if let Ok(local) = listener.local_addr() {
            tracing::info!(addr = %local, "starting comparison api");
        }
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }
}
