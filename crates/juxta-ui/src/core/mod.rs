//! Core, DOM-free primitives for the comparison widgets.
pub mod config;
pub mod markup;
pub mod page;
pub mod reconcile;
pub mod selection;
pub mod surface;
pub mod sync;
