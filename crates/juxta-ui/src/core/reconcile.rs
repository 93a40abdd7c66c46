//! UI reconciler: applies a confirmed toggle to the page.
//!
//! Only ever called with counts the service returned; a failed sync leaves
//! the page untouched.

use std::rc::Rc;
use std::time::Duration;

use juxta_core::{CompareAction, SyncResult};
use tracing::trace;

use crate::core::surface::{Affordance, BadgeSurface, ContainerSurface, PulseScheduler};

/// Applies confirmed toggles to containers and the page badge.
pub struct UiReconciler<B, P> {
    badge: Option<Rc<B>>,
    scheduler: P,
    pulse: Duration,
}

impl<B, P> UiReconciler<B, P>
where
    B: BadgeSurface + 'static,
    P: PulseScheduler,
{
    /// Build a reconciler; pages without a badge pass `None`.
    pub fn new(badge: Option<Rc<B>>, scheduler: P, pulse: Duration) -> Self {
        Self {
            badge,
            scheduler,
            pulse,
        }
    }

    /// Flip the container's affordance and highlight, then refresh the badge.
    pub fn apply_toggle<C>(&self, container: &C, action: CompareAction, result: SyncResult)
    where
        C: ContainerSurface + ?Sized,
    {
        container.show_affordance(Affordance::after(action));
        container.set_row_highlight(action.selects());
        self.apply_counts(result);
    }

    /// Write the badge text and run one attention pulse.
    pub fn apply_counts(&self, result: SyncResult) {
        let Some(badge) = &self.badge else {
            return;
        };
        let text = result.badge_text();
        trace!(badge = %text, "updating comparison badge");
        badge.set_count_text(&text);
        badge.set_pulse(true);
        let badge = Rc::clone(badge);
        self.scheduler
            .schedule(self.pulse, Box::new(move || badge.set_pulse(false)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeBadge {
        text: RefCell<String>,
        pulsing: Cell<bool>,
        pulses: Cell<u32>,
    }

    impl BadgeSurface for FakeBadge {
        fn set_count_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
        }

        fn set_pulse(&self, active: bool) {
            if active {
                self.pulses.set(self.pulses.get() + 1);
            }
            self.pulsing.set(active);
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        tasks: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
    }

    impl ManualScheduler {
        fn run_all(&self) {
            let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl PulseScheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
            self.tasks.borrow_mut().push((delay, task));
        }
    }

    #[derive(Default)]
    struct FakeContainer {
        affordance: Cell<Option<Affordance>>,
        highlight: Cell<Option<bool>>,
    }

    impl ContainerSurface for FakeContainer {
        fn context_ids_attr(&self) -> Option<String> {
            Some("c1".to_string())
        }

        fn model_ids_attr(&self) -> Option<String> {
            None
        }

        fn show_affordance(&self, affordance: Affordance) {
            self.affordance.set(Some(affordance));
        }

        fn set_row_highlight(&self, highlighted: bool) {
            self.highlight.set(Some(highlighted));
        }
    }

    fn counts(context_count: u64, model_count: u64) -> SyncResult {
        SyncResult {
            context_count,
            model_count,
        }
    }

    #[test]
    fn add_shows_remove_and_highlights() {
        let badge = Rc::new(FakeBadge::default());
        let scheduler = Rc::new(ManualScheduler::default());
        let reconciler = UiReconciler::new(
            Some(Rc::clone(&badge)),
            Rc::clone(&scheduler),
            Duration::from_millis(500),
        );
        let container = FakeContainer::default();

        reconciler.apply_toggle(&container, CompareAction::Add, counts(2, 1));
        assert_eq!(container.affordance.get(), Some(Affordance::Remove));
        assert_eq!(container.highlight.get(), Some(true));
        assert_eq!(*badge.text.borrow(), "(3)");
        assert!(badge.pulsing.get());

        let scheduled = scheduler.tasks.borrow().iter().map(|(delay, _)| *delay).collect::<Vec<_>>();
        assert_eq!(scheduled, vec![Duration::from_millis(500)]);
        scheduler.run_all();
        assert!(!badge.pulsing.get());
    }

    #[test]
    fn remove_to_empty_clears_badge_text() {
        let badge = Rc::new(FakeBadge::default());
        let scheduler = Rc::new(ManualScheduler::default());
        let reconciler =
            UiReconciler::new(Some(Rc::clone(&badge)), Rc::clone(&scheduler), Duration::ZERO);
        let container = FakeContainer::default();

        reconciler.apply_toggle(&container, CompareAction::Remove, counts(0, 0));
        assert_eq!(container.affordance.get(), Some(Affordance::Add));
        assert_eq!(container.highlight.get(), Some(false));
        assert_eq!(*badge.text.borrow(), "");
        assert_eq!(badge.pulses.get(), 1);
    }

    #[test]
    fn every_toggle_pulses() {
        let badge = Rc::new(FakeBadge::default());
        let scheduler = Rc::new(ManualScheduler::default());
        let reconciler =
            UiReconciler::new(Some(Rc::clone(&badge)), Rc::clone(&scheduler), Duration::ZERO);
        let container = FakeContainer::default();

        reconciler.apply_toggle(&container, CompareAction::Add, counts(1, 0));
        reconciler.apply_toggle(&container, CompareAction::Add, counts(1, 0));
        assert_eq!(badge.pulses.get(), 2);
        assert_eq!(scheduler.tasks.borrow().len(), 2);
    }

    #[test]
    fn missing_badge_still_updates_container() {
        let scheduler = Rc::new(ManualScheduler::default());
        let reconciler: UiReconciler<FakeBadge, _> =
            UiReconciler::new(None, Rc::clone(&scheduler), Duration::ZERO);
        let container = FakeContainer::default();

        reconciler.apply_toggle(&container, CompareAction::Add, counts(1, 0));
        assert_eq!(container.affordance.get(), Some(Affordance::Remove));
        assert!(scheduler.tasks.borrow().is_empty());
    }
}
