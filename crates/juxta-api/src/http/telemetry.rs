//! Per-route request counting.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::ApiState;

/// Count the request under its route template and response status.
///
/// Installed with `route_layer`, so only matched routes reach it and the
/// label set stays bounded by the router's templates.
pub(crate) async fn record_http_request(
    State(state): State<Arc<ApiState>>,
    matched: MatchedPath,
    request: Request,
    next: Next,
) -> Response {
    let route = matched.as_str().to_owned();
    let response = next.run(request).await;
    state
        .telemetry
        .inc_http_request(&route, response.status().as_u16());
    response
}
