//! `web-sys` implementations of the rendering seams.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::core::markup::{
    BADGE_COUNT_SELECTOR, CONTEXT_IDS_ATTR, HIDDEN_CLASS, HIGHLIGHT_CLASS, MODEL_IDS_ATTR,
    ROW_SELECTOR, affordance_visibility,
};
use crate::core::surface::{Affordance, BadgeSurface, ContainerSurface, PulseScheduler};

/// A `.js-compare-container` element.
#[derive(Clone, Debug)]
pub struct DomContainer {
    element: Element,
}

impl DomContainer {
    /// Wrap a container element.
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self { element }
    }

    fn set_class_on_all(&self, selector: &str, class: &str, present: bool) {
        let Ok(nodes) = self.element.query_selector_all(selector) else {
            return;
        };
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            {
                set_class(&element, class, present);
            }
        }
    }
}

impl ContainerSurface for DomContainer {
    fn context_ids_attr(&self) -> Option<String> {
        self.element.get_attribute(CONTEXT_IDS_ATTR)
    }

    fn model_ids_attr(&self) -> Option<String> {
        self.element.get_attribute(MODEL_IDS_ATTR)
    }

    fn show_affordance(&self, affordance: Affordance) {
        for (selector, hidden) in affordance_visibility(affordance) {
            self.set_class_on_all(selector, HIDDEN_CLASS, hidden);
        }
    }

    fn set_row_highlight(&self, highlighted: bool) {
        let row = self
            .element
            .parent_element()
            .and_then(|parent| parent.closest(ROW_SELECTOR).ok().flatten());
        if let Some(row) = row {
            set_class(&row, HIGHLIGHT_CLASS, highlighted);
        }
    }
}

/// The `.js-sidebar-compare` badge.
#[derive(Clone, Debug)]
pub struct DomBadge {
    element: Element,
}

impl DomBadge {
    /// Wrap the badge element.
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self { element }
    }
}

impl BadgeSurface for DomBadge {
    fn set_count_text(&self, text: &str) {
        if let Ok(Some(count)) = self.element.query_selector(BADGE_COUNT_SELECTOR) {
            count.set_text_content(Some(text));
        }
    }

    fn set_pulse(&self, active: bool) {
        set_class(&self.element, HIGHLIGHT_CLASS, active);
    }
}

/// Schedules pulse teardown on the browser's timer queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl PulseScheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

fn set_class(element: &Element, class: &str, present: bool) {
    let _ = element.class_list().toggle_with_force(class, present);
}
