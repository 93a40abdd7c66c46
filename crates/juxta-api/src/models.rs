//! HTTP payloads owned by the API surface.

use serde::{Deserialize, Serialize};

/// Liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Build identifier recorded by telemetry.
    pub build: String,
}
