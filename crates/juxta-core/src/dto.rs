//! Request and response bodies exchanged with the comparison session service.
//!
//! # Design
//! - Field names follow the wire contract (`contexts`, `contextCount`, ...).
//! - Missing id lists deserialize as empty so partial bodies stay valid.
//! - Only aggregate counts travel back after a delta; never the full set.
//! - Count bodies are decoded in two steps: a JSON string holding the
//!   document is unwrapped once before the counts are read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::GroupRef;

/// Body of a delta request: raw id lists, not deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareDeltaRequest {
    /// Context ids to add or remove.
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Model ids to add or remove.
    #[serde(default)]
    pub models: Vec<String>,
}

impl CompareDeltaRequest {
    /// Build a request carrying a group's id lists verbatim.
    #[must_use]
    pub fn from_group(group: &GroupRef) -> Self {
        Self {
            contexts: group.context_ids.clone(),
            models: group.model_ids.clone(),
        }
    }
}

/// Totals of the canonical set after a delta was applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Number of context ids in the set.
    pub context_count: u64,
    /// Number of model ids in the set.
    pub model_count: u64,
}

impl SyncResult {
    /// Combined number of selected items.
    #[must_use]
    pub const fn total(self) -> u64 {
        self.context_count.saturating_add(self.model_count)
    }

    /// Sidebar badge text: `"(N)"` when anything is selected, empty otherwise.
    #[must_use]
    pub fn badge_text(self) -> String {
        match self.total() {
            0 => String::new(),
            total => format!("({total})"),
        }
    }

    /// Decode a delta response body, unwrapping one level of string encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not JSON, or does not carry both counts
    /// after unwrapping.
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(body)? {
            Value::String(inner) => serde_json::from_str(&inner),
            other => serde_json::from_value(other),
        }
    }
}

/// Full listing of a session's set, used to embed the page snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSnapshot {
    /// Selected context ids, sorted.
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Selected model ids, sorted.
    #[serde(default)]
    pub models: Vec<String>,
}

/// RFC9457 problem document returned by the service for failed requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short, constant summary.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Request-specific explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
