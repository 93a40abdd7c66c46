//! Page lifecycle binder logic: initial render and click-driven toggles.
//!
//! # Design
//! - `initialize` runs once per page load against the embedded snapshot.
//! - Each click issues its own delta. Toggles are not serialised per group, so
//!   overlapping clicks can see their responses in any order.
//! - Under [`StalePolicy::LatestPerGroup`] a response is only reconciled if no
//!   newer toggle was issued for the same group in the meantime.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use juxta_core::{CompareAction, ComparisonSet, GroupRef, SyncResult};
use tracing::{debug, info, warn};

use crate::core::config::{CompareConfig, StalePolicy};
use crate::core::reconcile::UiReconciler;
use crate::core::selection::{InitialPass, render_initial};
use crate::core::surface::{BadgeSurface, ContainerSurface, PulseScheduler};
use crate::core::sync::{DeltaTransport, SyncClient, SyncError};

/// What a click ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The service confirmed the delta and the page was updated.
    Applied(SyncResult),
    /// The container carries no ids; nothing was sent.
    Skipped,
    /// The service confirmed the delta but a newer toggle superseded it.
    Stale(SyncResult),
}

/// Comparison widgets bound to one page.
pub struct ComparePage<T, B, P> {
    sync: SyncClient<T>,
    reconciler: UiReconciler<B, P>,
    stale_policy: StalePolicy,
    latest: RefCell<HashMap<String, u64>>,
    next_ticket: Cell<u64>,
}

impl<T, B, P> ComparePage<T, B, P>
where
    T: DeltaTransport,
    B: BadgeSurface + 'static,
    P: PulseScheduler,
{
    /// Assemble the page from its settings and rendering seams.
    pub fn new(config: &CompareConfig, transport: T, badge: Option<Rc<B>>, scheduler: P) -> Self {
        Self {
            sync: SyncClient::new(transport, config.endpoint_base.clone()),
            reconciler: UiReconciler::new(badge, scheduler, config.pulse),
            stale_policy: config.stale_policy,
            latest: RefCell::default(),
            next_ticket: Cell::new(0),
        }
    }

    /// Render every container against the page's snapshot.
    pub fn initialize<'a, C, I>(&self, snapshot: &ComparisonSet, containers: I) -> InitialPass
    where
        C: ContainerSurface + ?Sized + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let pass = render_initial(containers, snapshot);
        let counts = snapshot.counts();
        info!(
            contexts = counts.context_count,
            models = counts.model_count,
            containers = pass.rendered,
            "comparison widgets initialised"
        );
        pass
    }

    /// Send `action` for the container's group and reconcile on success.
    ///
    /// # Errors
    ///
    /// Returns the sync failure; the page is left as it was.
    pub async fn toggle<C>(
        &self,
        container: &C,
        action: CompareAction,
    ) -> Result<ToggleOutcome, SyncError>
    where
        C: ContainerSurface + ?Sized,
    {
        let group = container.group();
        if !group.is_eligible() {
            debug!(%action, "ignoring toggle on container without ids");
            return Ok(ToggleOutcome::Skipped);
        }

        let ticket = self.issue_ticket(&group);
        let result = match self
            .sync
            .request_delta(action, &group.context_ids, &group.model_ids)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                warn!(%action, group = %group.key(), error = %err, "comparison toggle failed");
                return Err(err);
            }
        };

        if self.stale_policy == StalePolicy::LatestPerGroup && !self.is_latest(&group, ticket) {
            debug!(%action, group = %group.key(), ticket, "discarding superseded response");
            return Ok(ToggleOutcome::Stale(result));
        }
        self.reconciler.apply_toggle(container, action, result);
        debug!(
            %action,
            group = %group.key(),
            contexts = result.context_count,
            models = result.model_count,
            "comparison toggle applied"
        );
        Ok(ToggleOutcome::Applied(result))
    }

    fn issue_ticket(&self, group: &GroupRef) -> u64 {
        let ticket = self.next_ticket.get() + 1;
        self.next_ticket.set(ticket);
        self.latest.borrow_mut().insert(group.key(), ticket);
        ticket
    }

    fn is_latest(&self, group: &GroupRef, ticket: u64) -> bool {
        self.latest.borrow().get(&group.key()) == Some(&ticket)
    }
}
