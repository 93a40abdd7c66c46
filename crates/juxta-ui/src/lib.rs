#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Browser-side comparison selection sync for server-rendered result pages.
//!
//! The page markup is produced elsewhere; this crate reads the embedded
//! snapshot, renders add/remove affordances, forwards clicks to the session
//! service as deltas, and reconciles the page with the counts it returns.
//!
//! Everything under [`core`] is DOM-free and runs natively in tests. The
//! `services` and `app` modules wire it to `web-sys` on `wasm32` only.

pub mod core;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
pub mod app;

pub use crate::core::config::{CompareConfig, StalePolicy};
pub use crate::core::page::{ComparePage, ToggleOutcome};
pub use crate::core::reconcile::UiReconciler;
pub use crate::core::selection::{InitialPass, is_selected, render_initial};
pub use crate::core::surface::{Affordance, BadgeSurface, ContainerSurface, PulseScheduler};
pub use crate::core::sync::{DeltaTransport, RawResponse, SyncClient, SyncError, TransportError};
