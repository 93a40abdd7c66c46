//! Sync client: sends one comparison delta and decodes the confirmed counts.
//!
//! # Design
//! - Exactly one round trip per delta; nothing is retried.
//! - The body is read as text and decoded in a second step, so a JSON document
//!   that was itself string-encoded is accepted as well.
//! - Failures are surfaced to the caller; the page is never touched from here.

use std::rc::Rc;

use async_trait::async_trait;
use juxta_core::{CompareAction, CompareDeltaRequest, SyncResult};
use thiserror::Error;
use tracing::debug;

/// Undecoded response from the session service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request never produced a response.
#[derive(Debug, Error)]
#[error("comparison request failed")]
pub struct TransportError {
    /// Transport-specific description.
    pub message: String,
}

impl TransportError {
    /// Wrap a transport failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTP seam used by the sync client.
#[async_trait(?Send)]
pub trait DeltaTransport {
    /// POST a JSON body to `url` and return the raw response.
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError>;
}

#[async_trait(?Send)]
impl<T: DeltaTransport + ?Sized> DeltaTransport for Rc<T> {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        (**self).post_json(url, body).await
    }
}

/// Errors raised while synchronising a delta.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request body could not be serialised.
    #[error("failed to encode comparison delta")]
    Encode {
        /// Serialisation failure.
        source: serde_json::Error,
    },
    /// No response was received.
    #[error("comparison request failed")]
    Transport {
        /// Transport failure.
        #[source]
        source: TransportError,
    },
    /// The service answered with a non-success status.
    #[error("comparison service returned an error status")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The body did not decode into counts.
    #[error("comparison response was malformed")]
    MalformedResponse {
        /// Decoding failure.
        source: serde_json::Error,
    },
}

/// Client for the `/comparison/update/{action}.json` endpoints.
#[derive(Clone, Debug)]
pub struct SyncClient<T> {
    transport: T,
    endpoint_base: String,
}

impl<T: DeltaTransport> SyncClient<T> {
    /// Create a client; an empty base targets the page's own origin.
    pub fn new(transport: T, endpoint_base: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint_base: endpoint_base.into(),
        }
    }

    /// Full URL of the endpoint for `action`.
    #[must_use]
    pub fn endpoint(&self, action: CompareAction) -> String {
        format!(
            "{}{}",
            self.endpoint_base.trim_end_matches('/'),
            action.update_path()
        )
    }

    /// Send one delta and return the counts the service confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the request fails, the
    /// service responds with a non-2xx status, or the response is malformed.
    pub async fn request_delta(
        &self,
        action: CompareAction,
        context_ids: &[String],
        model_ids: &[String],
    ) -> Result<SyncResult, SyncError> {
        let body = serde_json::to_string(&CompareDeltaRequest {
            contexts: context_ids.to_vec(),
            models: model_ids.to_vec(),
        })
        .map_err(|source| SyncError::Encode { source })?;
        let url = self.endpoint(action);
        debug!(
            %action,
            url = %url,
            contexts = context_ids.len(),
            models = model_ids.len(),
            "sending comparison delta"
        );

        let response = self
            .transport
            .post_json(&url, body)
            .await
            .map_err(|source| SyncError::Transport { source })?;
        if !response.is_success() {
            return Err(SyncError::Status {
                status: response.status,
            });
        }
        parse_counts(&response.body)
    }
}

/// Decode a count body, unwrapping one level of string encoding if present.
///
/// # Errors
///
/// Returns [`SyncError::MalformedResponse`] when the body is not valid JSON or
/// lacks either count.
pub fn parse_counts(body: &str) -> Result<SyncResult, SyncError> {
    SyncResult::from_body(body).map_err(|source| SyncError::MalformedResponse { source })
}
