//! Comparison set endpoints.
//!
//! # Design
//! - Deltas reply with aggregate counts only; the full set is never echoed.
//! - Repeated adds/removes are idempotent and never error.
//! - Clearing redirects back to the referring page.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use juxta_core::{CompareAction, CompareDeltaRequest};
use tracing::info;

use crate::http::constants::DEFAULT_REDIRECT;
use crate::http::errors::ApiError;
use crate::http::session::RequestSession;
use crate::state::ApiState;

/// `POST /comparison/update/{action}.json`
pub(crate) async fn update_comparison(
    State(state): State<Arc<ApiState>>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    body: Result<Json<CompareDeltaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let action = CompareAction::from_path_segment(&segment)
        .map_err(|err| ApiError::bad_request(format!("unexpected action '{}'", err.value)))?;
    let Json(delta) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let session = RequestSession::resolve(&headers);

    let counts = state
        .sessions
        .apply(session.id, action, &delta)
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;
    state.telemetry.inc_compare_delta(action.as_str());
    state.refresh_session_gauge().await;

    info!(
        session = %session.id,
        action = %action,
        contexts = delta.contexts.len(),
        models = delta.models.len(),
        context_count = counts.context_count,
        model_count = counts.model_count,
        "comparison delta applied"
    );
    Ok(session.attach(Json(counts).into_response()))
}

/// `POST /comparison/clear`
pub(crate) async fn clear_comparison(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session = RequestSession::resolve(&headers);
    let existed = state
        .sessions
        .clear(session.id)
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;
    state.telemetry.inc_compare_clear();
    state.refresh_session_gauge().await;
    info!(session = %session.id, existed, "comparison set cleared");

    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_REDIRECT);
    Ok(session.attach(Redirect::to(target).into_response()))
}

/// `GET /comparison/snapshot.json`
pub(crate) async fn comparison_snapshot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session = RequestSession::resolve(&headers);
    let set = state
        .sessions
        .load(session.id)
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(session.attach(Json(set.snapshot()).into_response()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::constants::SESSION_COOKIE;
    use crate::session::InMemorySessionStore;
    use axum::http::{HeaderValue, StatusCode};
    use http_body_util::BodyExt;
    use juxta_core::{CompareSnapshot, SyncResult};
    use juxta_telemetry::Metrics;
    use uuid::Uuid;

    fn state() -> Arc<ApiState> {
        Arc::new(ApiState::new(
            InMemorySessionStore::shared(),
            Metrics::new().expect("metrics"),
        ))
    }

    fn session_headers(id: Uuid) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={id}")).expect("cookie"),
        );
        headers
    }

    fn body(contexts: &[&str], models: &[&str]) -> Result<Json<CompareDeltaRequest>, JsonRejection> {
        Ok(Json(CompareDeltaRequest {
            contexts: contexts.iter().map(|id| (*id).to_string()).collect(),
            models: models.iter().map(|id| (*id).to_string()).collect(),
        }))
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json")
    }

    async fn update(
        state: &Arc<ApiState>,
        segment: &str,
        session: Uuid,
        contexts: &[&str],
        models: &[&str],
    ) -> Result<Response, ApiError> {
        update_comparison(
            State(state.clone()),
            Path(segment.to_string()),
            session_headers(session),
            body(contexts, models),
        )
        .await
    }

    #[tokio::test]
    async fn add_then_remove_reports_counts() {
        let state = state();
        let session = Uuid::new_v4();

        let response = update(&state, "add.json", session, &["c1"], &[])
            .await
            .expect("add");
        assert_eq!(response.status(), StatusCode::OK);
        let counts: SyncResult = json_body(response).await;
        assert_eq!(
            counts,
            SyncResult {
                context_count: 1,
                model_count: 0
            }
        );

        let response = update(&state, "remove.json", session, &["c1"], &[])
            .await
            .expect("remove");
        let counts: SyncResult = json_body(response).await;
        assert_eq!(counts, SyncResult::default());

        let snapshot = state.telemetry.snapshot();
        assert_eq!(snapshot.deltas_added, 1);
        assert_eq!(snapshot.deltas_removed, 1);
    }

    #[tokio::test]
    async fn repeated_add_is_idempotent() {
        let state = state();
        let session = Uuid::new_v4();
        let first: SyncResult = json_body(
            update(&state, "add.json", session, &["c1", "c2"], &["m1"])
                .await
                .expect("add"),
        )
        .await;
        let second: SyncResult = json_body(
            update(&state, "add.json", session, &["c2", "c1"], &["m1"])
                .await
                .expect("add again"),
        )
        .await;
        assert_eq!(first, second);
        assert_eq!(second.total(), 3);
    }

    #[tokio::test]
    async fn unknown_action_is_rejected() {
        let state = state();
        let err = update(&state, "toggle.json", Uuid::new_v4(), &["c1"], &[])
            .await
            .expect_err("unknown action");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.telemetry.snapshot().deltas_added, 0);
    }

    #[tokio::test]
    async fn first_request_issues_session_cookie() {
        let state = state();
        let response = update_comparison(
            State(state.clone()),
            Path("add.json".to_string()),
            HeaderMap::new(),
            body(&["c1"], &[]),
        )
        .await
        .expect("add");
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("set-cookie");
        assert!(cookie.starts_with(SESSION_COOKIE));
    }

    #[tokio::test]
    async fn snapshot_lists_the_session_set() {
        let state = state();
        let session = Uuid::new_v4();
        update(&state, "add.json", session, &["c2", "c1"], &["m1"])
            .await
            .expect("add");

        let response = comparison_snapshot(State(state.clone()), session_headers(session))
            .await
            .expect("snapshot");
        let snapshot: CompareSnapshot = json_body(response).await;
        assert_eq!(snapshot.contexts, vec!["c1", "c2"]);
        assert_eq!(snapshot.models, vec!["m1"]);
    }

    #[tokio::test]
    async fn clear_redirects_to_referer() {
        let state = state();
        let session = Uuid::new_v4();
        update(&state, "add.json", session, &["c1"], &[])
            .await
            .expect("add");

        let mut headers = session_headers(session);
        headers.insert(header::REFERER, HeaderValue::from_static("/search?q=x"));
        let response = clear_comparison(State(state.clone()), headers)
            .await
            .expect("clear");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/search?q=x"))
        );
        assert!(state.sessions.load(session).await.expect("load").is_empty());
        assert_eq!(state.telemetry.snapshot().clears, 1);
    }

    #[tokio::test]
    async fn clear_without_referer_goes_home() {
        let state = state();
        let response = clear_comparison(State(state), session_headers(Uuid::new_v4()))
            .await
            .expect("clear");
        assert_eq!(
            response.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static(DEFAULT_REDIRECT))
        );
    }
}
