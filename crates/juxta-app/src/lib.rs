#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Juxta server bootstrap wiring.
//!
//! Layout: `config.rs` (environment settings), `bootstrap.rs` (service wiring), `error.rs`.

/// Application bootstrap.
pub mod bootstrap;
/// Server settings read from the environment.
pub mod config;
/// Application error types.
pub mod error;

pub use bootstrap::run_app;
pub use config::{ConfigError, ServerConfig};
pub use error::{AppError, AppResult};
