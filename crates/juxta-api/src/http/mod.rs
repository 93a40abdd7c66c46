//! HTTP surface modules (router, handlers, middleware).

/// Comparison set handlers.
pub mod compare;
/// Shared constants and header names.
pub mod constants;
/// Problem response helpers and error types.
pub mod errors;
/// Health and metrics endpoints.
pub mod health;
/// Router construction and server host.
pub mod router;
/// Session cookie resolution.
pub mod session;
/// Metrics middleware for HTTP requests.
pub mod telemetry;
