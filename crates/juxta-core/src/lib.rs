#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Shared comparison-set model for the Juxta server, browser client and CLI.
//!
//! Layout:
//! - `codec.rs`: comma-joined id lists used by DOM attributes and CLI flags
//! - `model.rs`: canonical set, page-local groups and item references
//! - `action.rs`: add/remove delta actions and their route forms
//! - `dto.rs`: request/response bodies exchanged with the session service
//! - `error.rs`: parse failures for wire values

pub mod action;
pub mod codec;
pub mod dto;
pub mod error;
pub mod model;

pub use action::CompareAction;
pub use dto::{CompareDeltaRequest, CompareSnapshot, ProblemDetails, SyncResult};
pub use error::ParseActionError;
pub use model::{ComparisonItemRef, ComparisonSet, GroupRef, ItemKind};
