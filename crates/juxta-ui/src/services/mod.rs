//! Network services used by the DOM bindings.
pub mod api;
