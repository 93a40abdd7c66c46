//! Canonical comparison set and page-local groups.
//!
//! # Design
//! - The canonical set is a true set per kind; repeated adds/removes are idempotent.
//! - Groups are immutable snapshots of container markup and never own set state.
//! - A group with no ids at all is ineligible and never counts as selected.

use std::collections::BTreeSet;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::action::CompareAction;
use crate::codec;
use crate::dto::{CompareDeltaRequest, CompareSnapshot, SyncResult};

/// Category of comparable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Measurement context.
    Context,
    /// Modeling result.
    Model,
}

impl ItemKind {
    /// Lowercase label used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Model => "model",
        }
    }
}

/// Reference to one comparable item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComparisonItemRef {
    /// Item category.
    pub kind: ItemKind,
    /// Opaque identifier; compared as a string.
    pub id: String,
}

impl ComparisonItemRef {
    /// Reference a context id.
    #[must_use]
    pub fn context(id: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Context,
            id: id.into(),
        }
    }

    /// Reference a model id.
    #[must_use]
    pub fn model(id: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Model,
            id: id.into(),
        }
    }
}

/// The canonical selection, held per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonSet {
    context_ids: BTreeSet<String>,
    model_ids: BTreeSet<String>,
}

impl ComparisonSet {
    /// Build a set from already-decoded parts.
    #[must_use]
    pub const fn from_parts(context_ids: BTreeSet<String>, model_ids: BTreeSet<String>) -> Self {
        Self {
            context_ids,
            model_ids,
        }
    }

    /// Decode the snapshot embedded in page markup. Absent attributes mean empty parts.
    #[must_use]
    pub fn from_snapshot_attributes(contexts: Option<&str>, models: Option<&str>) -> Self {
        Self::from_parts(
            contexts.map(codec::decode).unwrap_or_default(),
            models.map(codec::decode).unwrap_or_default(),
        )
    }

    /// Ids of one kind.
    #[must_use]
    pub const fn ids(&self, kind: ItemKind) -> &BTreeSet<String> {
        match kind {
            ItemKind::Context => &self.context_ids,
            ItemKind::Model => &self.model_ids,
        }
    }

    const fn ids_mut(&mut self, kind: ItemKind) -> &mut BTreeSet<String> {
        match kind {
            ItemKind::Context => &mut self.context_ids,
            ItemKind::Model => &mut self.model_ids,
        }
    }

    /// Whether the item is a member.
    #[must_use]
    pub fn contains(&self, item: &ComparisonItemRef) -> bool {
        self.ids(item.kind).contains(&item.id)
    }

    /// Insert an item; returns `false` when it was already present.
    pub fn insert(&mut self, item: ComparisonItemRef) -> bool {
        self.ids_mut(item.kind).insert(item.id)
    }

    /// Remove an item; returns `false` when it was absent.
    pub fn remove(&mut self, item: &ComparisonItemRef) -> bool {
        self.ids_mut(item.kind).remove(&item.id)
    }

    /// Apply a delta and report the resulting totals.
    pub fn apply(&mut self, action: CompareAction, delta: &CompareDeltaRequest) -> SyncResult {
        let items = delta
            .contexts
            .iter()
            .map(ComparisonItemRef::context)
            .chain(delta.models.iter().map(ComparisonItemRef::model));
        for item in items {
            match action {
                CompareAction::Add => {
                    self.insert(item);
                }
                CompareAction::Remove => {
                    self.remove(&item);
                }
            }
        }
        self.counts()
    }

    /// Current totals per kind.
    #[must_use]
    pub fn counts(&self) -> SyncResult {
        SyncResult {
            context_count: u64::try_from(self.context_ids.len()).unwrap_or(u64::MAX),
            model_count: u64::try_from(self.model_ids.len()).unwrap_or(u64::MAX),
        }
    }

    /// True when neither kind has members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.context_ids.is_empty() && self.model_ids.is_empty()
    }

    /// Whether every id of an eligible group is a member. Ineligible groups are never selected.
    #[must_use]
    pub fn contains_group(&self, group: &GroupRef) -> bool {
        group.is_eligible() && group.items().all(|item| self.contains(&item))
    }

    /// Sorted listing for rendering and transport.
    #[must_use]
    pub fn snapshot(&self) -> CompareSnapshot {
        CompareSnapshot {
            contexts: self.context_ids.iter().cloned().collect(),
            models: self.model_ids.iter().cloned().collect(),
        }
    }
}

impl From<CompareSnapshot> for ComparisonSet {
    fn from(snapshot: CompareSnapshot) -> Self {
        Self::from_parts(
            snapshot.contexts.into_iter().collect(),
            snapshot.models.into_iter().collect(),
        )
    }
}

/// Ids represented by one page container, in markup order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GroupRef {
    /// Context ids of the container.
    pub context_ids: Vec<String>,
    /// Model ids of the container.
    pub model_ids: Vec<String>,
}

impl GroupRef {
    /// Build a group from explicit id lists.
    #[must_use]
    pub const fn new(context_ids: Vec<String>, model_ids: Vec<String>) -> Self {
        Self {
            context_ids,
            model_ids,
        }
    }

    /// Decode a container's grouping attributes. Absent attributes mean empty lists.
    #[must_use]
    pub fn from_attributes(contexts: Option<&str>, models: Option<&str>) -> Self {
        Self::new(
            contexts.map(codec::split).unwrap_or_default(),
            models.map(codec::split).unwrap_or_default(),
        )
    }

    /// Groups without any ids carry no toggle affordance.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !(self.context_ids.is_empty() && self.model_ids.is_empty())
    }

    /// Item references of the group, contexts first.
    pub fn items(&self) -> impl Iterator<Item = ComparisonItemRef> + '_ {
        self.context_ids
            .iter()
            .map(ComparisonItemRef::context)
            .chain(self.model_ids.iter().map(ComparisonItemRef::model))
    }

    /// Stable identity used for per-group bookkeeping.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}|{}",
            codec::encode(&self.context_ids),
            codec::encode(&self.model_ids)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    fn delta(contexts: &[&str], models: &[&str]) -> CompareDeltaRequest {
        CompareDeltaRequest {
            contexts: ids(contexts),
            models: ids(models),
        }
    }

    #[test]
    fn add_is_idempotent() {
        let mut set = ComparisonSet::default();
        let first = set.apply(CompareAction::Add, &delta(&["c1", "c2"], &["m1"]));
        let again = set.apply(CompareAction::Add, &delta(&["c1", "c2"], &["m1"]));
        assert_eq!(first, again);
        assert_eq!(again.context_count, 2);
        assert_eq!(again.model_count, 1);
    }

    #[test]
    fn remove_of_absent_ids_keeps_counts() {
        let mut set = ComparisonSet::default();
        set.apply(CompareAction::Add, &delta(&["c1"], &[]));
        let result = set.apply(CompareAction::Remove, &delta(&["c9"], &["m9"]));
        assert_eq!(result.context_count, 1);
        assert_eq!(result.model_count, 0);
    }

    #[test]
    fn duplicate_ids_in_one_delta_count_once() {
        let mut set = ComparisonSet::default();
        let result = set.apply(CompareAction::Add, &delta(&["c1", "c1"], &[]));
        assert_eq!(result.context_count, 1);
    }

    #[test]
    fn kinds_are_separate_namespaces() {
        let mut set = ComparisonSet::default();
        set.insert(ComparisonItemRef::context("7"));
        assert!(set.contains(&ComparisonItemRef::context("7")));
        assert!(!set.contains(&ComparisonItemRef::model("7")));
    }

    #[test]
    fn contains_group_is_a_subset_test() {
        let set = ComparisonSet::from_snapshot_attributes(Some("c1,c2,c3"), Some("m1"));
        assert!(set.contains_group(&GroupRef::new(ids(&["c1", "c3"]), Vec::new())));
        assert!(set.contains_group(&GroupRef::new(ids(&["c2"]), ids(&["m1"]))));
        assert!(!set.contains_group(&GroupRef::new(ids(&["c1", "c4"]), Vec::new())));
        assert!(!set.contains_group(&GroupRef::new(ids(&["c1"]), ids(&["m2"]))));
    }

    #[test]
    fn empty_group_is_never_selected() {
        let set = ComparisonSet::from_snapshot_attributes(Some("c1"), None);
        let group = GroupRef::from_attributes(None, None);
        assert!(!group.is_eligible());
        assert!(!set.contains_group(&group));
        assert!(!ComparisonSet::default().contains_group(&group));
    }

    #[test]
    fn snapshot_attributes_default_to_empty() {
        assert!(ComparisonSet::from_snapshot_attributes(None, None).is_empty());
        assert!(ComparisonSet::from_snapshot_attributes(Some(""), Some("")).is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_listing() {
        let set = ComparisonSet::from_snapshot_attributes(Some("b,a"), Some("m"));
        let listing = set.snapshot();
        assert_eq!(listing.contexts, ids(&["a", "b"]));
        assert_eq!(ComparisonSet::from(listing), set);
    }

    #[test]
    fn group_key_distinguishes_kinds() {
        let contexts = GroupRef::new(ids(&["1"]), Vec::new());
        let models = GroupRef::new(Vec::new(), ids(&["1"]));
        assert_ne!(contexts.key(), models.key());
        assert_eq!(contexts.key(), "1|");
    }
}
