//! Seams between the comparison logic and whatever renders the page.
//!
//! # Design
//! - The DOM adapters live behind `wasm32`; tests drive these traits with fakes.
//! - Surfaces take `&self` because DOM handles are shared, interior-mutable references.

use std::rc::Rc;
use std::time::Duration;

use juxta_core::{CompareAction, GroupRef};

/// Which toggle a container currently offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    /// "Add to comparison" is visible; the group is not selected.
    Add,
    /// "Remove from comparison" is visible; the group is selected.
    Remove,
}

impl Affordance {
    /// Affordance matching the group's membership in the comparison set.
    #[must_use]
    pub const fn for_membership(selected: bool) -> Self {
        if selected { Self::Remove } else { Self::Add }
    }

    /// Affordance to show once `action` has been confirmed.
    #[must_use]
    pub const fn after(action: CompareAction) -> Self {
        Self::for_membership(action.selects())
    }
}

/// One result container on the page.
pub trait ContainerSurface {
    /// Raw `data-context-ids` value, if present.
    fn context_ids_attr(&self) -> Option<String>;

    /// Raw `data-model-ids` value, if present.
    fn model_ids_attr(&self) -> Option<String>;

    /// Show exactly one of the add/remove affordances.
    fn show_affordance(&self, affordance: Affordance);

    /// Toggle the selected-row highlight.
    fn set_row_highlight(&self, highlighted: bool);

    /// Group declared by this container's attributes.
    fn group(&self) -> GroupRef {
        GroupRef::from_attributes(
            self.context_ids_attr().as_deref(),
            self.model_ids_attr().as_deref(),
        )
    }
}

/// Page-wide comparison badge.
pub trait BadgeSurface {
    /// Replace the badge's count text.
    fn set_count_text(&self, text: &str);

    /// Start or stop the attention pulse.
    fn set_pulse(&self, active: bool);
}

/// Deferred work used to end the badge pulse.
pub trait PulseScheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

impl<S: PulseScheduler + ?Sized> PulseScheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay, task);
    }
}
