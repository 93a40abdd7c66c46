#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the Juxta workspace.
//!
//! This crate centralises logging, metrics, and request-id helpers so the
//! server and CLI surfaces adopt a consistent observability story.

pub mod init;
pub mod layers;
pub mod metrics;

pub use init::{
    COMPILED_BUILD_SHA, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging,
};
pub use layers::{REQUEST_ID_HEADER, propagate_request_id_layer, set_request_id_layer};
pub use metrics::{Metrics, MetricsSnapshot};
