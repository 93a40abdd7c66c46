//! Selectors, attributes and classes the server-rendered markup exposes.
//!
//! These names are a contract with the page templates. Changing one means
//! changing the templates in lock-step.

use juxta_core::CompareAction;

use crate::core::surface::Affordance;

/// Element carrying the session's comparison snapshot.
pub const SNAPSHOT_SELECTOR: &str = "[data-compare-ids]";
/// Snapshot attribute listing the selected context ids.
pub const SNAPSHOT_CONTEXT_ATTR: &str = "data-compare-ids";
/// Snapshot attribute listing the selected model ids.
pub const SNAPSHOT_MODEL_ATTR: &str = "data-compare-model-ids";

/// Optional attribute overriding the delta endpoint base.
pub const ENDPOINT_ATTR: &str = "data-compare-endpoint";
/// Optional attribute overriding the badge pulse duration in milliseconds.
pub const PULSE_ATTR: &str = "data-compare-pulse-ms";
/// Optional attribute selecting how out-of-order responses are handled.
pub const STALE_POLICY_ATTR: &str = "data-compare-stale-policy";

/// Result container wrapping one comparable group.
pub const CONTAINER_SELECTOR: &str = ".js-compare-container";
/// Container attribute listing the group's context ids.
pub const CONTEXT_IDS_ATTR: &str = "data-context-ids";
/// Container attribute listing the group's model ids.
pub const MODEL_IDS_ATTR: &str = "data-model-ids";

/// Wrapper of the "add to comparison" link.
pub const ADD_AFFORDANCE: &str = ".js-compare";
/// Wrapper of the "remove from comparison" link.
pub const REMOVE_AFFORDANCE: &str = ".js-uncompare";
/// Clickable link inside the add wrapper.
pub const ADD_LINK: &str = ".js-compare a";
/// Clickable link inside the remove wrapper.
pub const REMOVE_LINK: &str = ".js-uncompare a";
/// Row highlighted while the group is selected.
pub const ROW_SELECTOR: &str = ".js-table-row";

/// Sidebar element holding the comparison badge.
pub const BADGE_SELECTOR: &str = ".js-sidebar-compare";
/// Text node inside the badge showing the count.
pub const BADGE_COUNT_SELECTOR: &str = ".js-count";

/// Class hiding an affordance.
pub const HIDDEN_CLASS: &str = "hidden";
/// Class marking a selected row and a pulsing badge.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Link selectors and the delta each one sends when clicked.
pub const LINK_BINDINGS: [(&str, CompareAction); 2] = [
    (ADD_LINK, CompareAction::Add),
    (REMOVE_LINK, CompareAction::Remove),
];

/// Wrapper selector for the given affordance.
#[must_use]
pub const fn affordance_selector(affordance: Affordance) -> &'static str {
    match affordance {
        Affordance::Add => ADD_AFFORDANCE,
        Affordance::Remove => REMOVE_AFFORDANCE,
    }
}

/// Each affordance wrapper and whether it carries [`HIDDEN_CLASS`] while
/// `shown` is displayed.
#[must_use]
pub fn affordance_visibility(shown: Affordance) -> [(&'static str, bool); 2] {
    [Affordance::Add, Affordance::Remove]
        .map(|affordance| (affordance_selector(affordance), affordance != shown))
}
