use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::item::ItemId;

/// The durable, filter-independent set of chosen items.
///
/// Caller-owned session state. Membership changes go through the
/// reconciliation diff (or its bulk pre-steps); an id referencing an item
/// that has left the catalog stays in the set and is simply inert in
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn insert(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        self.ids.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }

    /// Union with another set, in place. Used when a saved suggestion is
    /// merged into the current session.
    pub fn union_with(&mut self, other: &SelectionSet) {
        self.ids.extend(other.iter());
    }

    /// Drop ids the predicate rejects. Optional hygiene after a catalog
    /// reload; the core contract preserves stale ids.
    pub fn retain_known<F: FnMut(ItemId) -> bool>(&mut self, mut known: F) {
        self.ids.retain(|id| known(*id));
    }
}

impl FromIterator<ItemId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self::from_ids(iter)
    }
}
