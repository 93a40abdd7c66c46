//! Fetch-backed transport for comparison deltas.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::core::sync::{DeltaTransport, RawResponse, TransportError};

/// Sends deltas with the browser's `fetch`, carrying the session cookie.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl DeltaTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        let response = Request::post(url)
            .header("content-type", "application/json")
            .header("cache-control", "no-cache")
            .body(body)
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
