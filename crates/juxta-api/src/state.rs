//! Shared state handed to every handler.

use juxta_telemetry::Metrics;
use tracing::warn;

use crate::session::SharedSessions;

/// Dependencies reachable from request handlers.
pub(crate) struct ApiState {
    pub(crate) sessions: SharedSessions,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    pub(crate) const fn new(sessions: SharedSessions, telemetry: Metrics) -> Self {
        Self {
            sessions,
            telemetry,
        }
    }

    /// Refresh the session gauge; failures only cost metric accuracy.
    pub(crate) async fn refresh_session_gauge(&self) {
        match self.sessions.session_count().await {
            Ok(count) => self
                .telemetry
                .set_compare_sessions(i64::try_from(count).unwrap_or(i64::MAX)),
            Err(err) => warn!(error = %err, "failed to count comparison sessions"),
        }
    }
}
