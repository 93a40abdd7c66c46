#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that boots the comparison service.

use juxta_app::{AppResult, run_app};

/// Bootstraps the server and blocks until it stops.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
