#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Session-backed comparison set service.
//!
//! Layout:
//! - `http/`: router, handlers, session cookies, problem responses
//! - `session.rs`: per-session canonical set storage
//! - `state.rs`: dependencies shared with handlers
//! - `models.rs`: payloads owned by the HTTP surface
//! - `error.rs`: bootstrap and serve failures

pub mod error;
mod http;
pub mod models;
pub mod session;
mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use session::{InMemorySessionStore, SessionId, SessionStore, SharedSessions};
