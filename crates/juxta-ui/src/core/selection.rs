//! Local selection view: membership checks and the initial render pass.
//!
//! # Design
//! - A group counts as selected only when every one of its ids is in the set.
//! - Containers with no ids are left exactly as the server rendered them.

use juxta_core::{ComparisonSet, GroupRef};
use tracing::debug;

use crate::core::surface::{Affordance, ContainerSurface};

/// Whether `group` is fully contained in `current`.
#[must_use]
pub fn is_selected(group: &GroupRef, current: &ComparisonSet) -> bool {
    current.contains_group(group)
}

/// Tally of one initial render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitialPass {
    /// Containers whose affordance was rendered.
    pub rendered: usize,
    /// Rendered containers shown as selected.
    pub selected: usize,
    /// Containers skipped for lacking group data.
    pub skipped: usize,
}

/// Show the correct affordance and highlight for every container.
pub fn render_initial<'a, C, I>(containers: I, current: &ComparisonSet) -> InitialPass
where
    C: ContainerSurface + ?Sized + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut pass = InitialPass::default();
    for container in containers {
        let group = container.group();
        if !group.is_eligible() {
            pass.skipped += 1;
            continue;
        }
        let selected = is_selected(&group, current);
        container.show_affordance(Affordance::for_membership(selected));
        container.set_row_highlight(selected);
        pass.rendered += 1;
        if selected {
            pass.selected += 1;
        }
    }
    debug!(
        rendered = pass.rendered,
        selected = pass.selected,
        skipped = pass.skipped,
        "rendered comparison affordances"
    );
    pass
}
