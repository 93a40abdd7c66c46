//! Page binding: reads the snapshot, renders affordances and wires click delegation.
//!
//! # Design
//! - One delegated listener per link kind on the page element; listeners live
//!   as long as the page and are never removed.
//! - Each click spawns its own toggle task; nothing is queued or debounced.

mod dom;

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::document;
use juxta_core::{CompareAction, ComparisonSet};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

pub use dom::{DomBadge, DomContainer, TimeoutScheduler};

use crate::core::config::CompareConfig;
use crate::core::markup::{
    BADGE_SELECTOR, CONTAINER_SELECTOR, ENDPOINT_ATTR, LINK_BINDINGS, PULSE_ATTR,
    SNAPSHOT_CONTEXT_ATTR, SNAPSHOT_MODEL_ATTR, SNAPSHOT_SELECTOR, STALE_POLICY_ATTR,
};
use crate::core::page::ComparePage;
use crate::services::api::FetchTransport;

type DomPage = ComparePage<FetchTransport, DomBadge, TimeoutScheduler>;

/// Bind the comparison widgets inside `page`.
///
/// The snapshot and the sidebar badge are looked up on the whole document;
/// containers and links only inside `page`.
#[wasm_bindgen(js_name = initCompareButtons)]
pub fn init_compare_buttons(page: Element) {
    console_error_panic_hook::set_once();

    let config = CompareConfig::from_attributes(
        page.get_attribute(ENDPOINT_ATTR).as_deref(),
        page.get_attribute(PULSE_ATTR).as_deref(),
        page.get_attribute(STALE_POLICY_ATTR).as_deref(),
    );
    let document = document();
    let snapshot = document
        .query_selector(SNAPSHOT_SELECTOR)
        .ok()
        .flatten()
        .map_or_else(ComparisonSet::default, |element| {
            ComparisonSet::from_snapshot_attributes(
                element.get_attribute(SNAPSHOT_CONTEXT_ATTR).as_deref(),
                element.get_attribute(SNAPSHOT_MODEL_ATTR).as_deref(),
            )
        });
    let badge = document
        .query_selector(BADGE_SELECTOR)
        .ok()
        .flatten()
        .map(|element| Rc::new(DomBadge::new(element)));

    let compare_page = Rc::new(DomPage::new(&config, FetchTransport, badge, TimeoutScheduler));
    let containers = containers_in(&page);
    compare_page.initialize(&snapshot, &containers);

    for (selector, action) in LINK_BINDINGS {
        bind_clicks(&page, selector, action, &compare_page);
    }
}

fn containers_in(page: &Element) -> Vec<DomContainer> {
    let Ok(nodes) = page.query_selector_all(CONTAINER_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomContainer::new)
        .collect()
}

fn bind_clicks(
    page: &Element,
    selector: &'static str,
    action: CompareAction,
    compare_page: &Rc<DomPage>,
) {
    let compare_page = Rc::clone(compare_page);
    EventListener::new_with_options(
        page,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(container) = clicked_container(event, selector) else {
                return;
            };
            event.prevent_default();
            let compare_page = Rc::clone(&compare_page);
            spawn_local(async move {
                if let Err(err) = compare_page.toggle(&container, action).await {
                    gloo::console::warn!(format!("comparison {action} failed: {err}"));
                }
            });
        },
    )
    .forget();
}

fn clicked_container(event: &Event, link_selector: &str) -> Option<DomContainer> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let link = target.closest(link_selector).ok()??;
    let container = link.closest(CONTAINER_SELECTOR).ok()??;
    Some(DomContainer::new(container))
}
