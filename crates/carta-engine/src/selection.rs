use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use carta_types::{ItemId, SelectionSet};

use crate::pricing::PricedItem;

/// Checkbox state of items as observed in one rendered view.
///
/// The same shape serves two roles: the *current* snapshot built from the
/// grid each render, and the *previous* snapshot accumulated across renders
/// (last-known state per id). Ids that scrolled out of the filtered view
/// simply have no entry in the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleState {
    entries: BTreeMap<ItemId, bool>,
}

impl VisibleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize a snapshot with every id set to the same state. Bulk
    /// operations are built on this.
    pub fn uniform(ids: impl IntoIterator<Item = ItemId>, checked: bool) -> Self {
        Self {
            entries: ids.into_iter().map(|id| (id, checked)).collect(),
        }
    }

    pub fn set(&mut self, id: ItemId, checked: bool) {
        self.entries.insert(id, checked);
    }

    /// Last observed state, or `None` if the id was never seen.
    pub fn get(&self, id: ItemId) -> Option<bool> {
        self.entries.get(&id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, bool)> + '_ {
        self.entries.iter().map(|(id, checked)| (*id, *checked))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ItemId, bool)> for VisibleState {
    fn from_iter<T: IntoIterator<Item = (ItemId, bool)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Fold one render's checkbox state into the durable selection.
///
/// Only ids present in `current` participate: an id newly observed as
/// checked is added, an id that flipped checked -> unchecked is removed,
/// and everything off-screen is left untouched in both the selection and
/// the previous snapshot - so filtering an item out of view never reads as
/// an uncheck. Idempotent: replaying the same `current` is a no-op.
pub fn reconcile(
    current: &VisibleState,
    previous: &mut VisibleState,
    selection: &mut SelectionSet,
) {
    for (id, checked) in current.iter() {
        let was_checked = previous.get(id) == Some(true);
        if checked && !was_checked {
            selection.insert(id);
        } else if !checked && was_checked {
            selection.remove(id);
        }
    }

    for (id, checked) in current.iter() {
        previous.set(id, checked);
    }
}

/// Check every visible item. Synthesizes an all-checked snapshot and runs
/// the one reconciliation path.
pub fn select_all_visible(
    visible: impl IntoIterator<Item = ItemId>,
    previous: &mut VisibleState,
    selection: &mut SelectionSet,
) {
    let current = VisibleState::uniform(visible, true);
    reconcile(&current, previous, selection);
}

/// Uncheck every visible item.
pub fn clear_all_visible(
    visible: impl IntoIterator<Item = ItemId>,
    previous: &mut VisibleState,
    selection: &mut SelectionSet,
) {
    let current = VisibleState::uniform(visible, false);
    reconcile(&current, previous, selection);
}

/// Empty the whole selection, including ids that were never observed in a
/// view (e.g. loaded from a saved suggestion). Those are first folded into
/// the previous snapshot as checked so the same diff can retire them.
pub fn clear_everything(previous: &mut VisibleState, selection: &mut SelectionSet) {
    for id in selection.iter() {
        previous.set(id, true);
    }
    let every_known: Vec<ItemId> = previous.ids().collect();
    let current = VisibleState::uniform(every_known, false);
    reconcile(&current, previous, selection);
}

/// The selected slice of a priced catalog, in catalog order. Selection ids
/// with no catalog counterpart are inert.
pub fn selected_subset(priced: &[PricedItem], selection: &SelectionSet) -> Vec<PricedItem> {
    priced
        .iter()
        .filter(|p| selection.contains(p.id()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ItemId {
        ItemId::new(raw)
    }

    #[test]
    fn checking_a_visible_item_adds_it() {
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::new();

        let current: VisibleState = [(id(1), true), (id(2), false)].into_iter().collect();
        reconcile(&current, &mut previous, &mut selection);

        assert!(selection.contains(id(1)));
        assert!(!selection.contains(id(2)));
        assert_eq!(previous.get(id(1)), Some(true));
        assert_eq!(previous.get(id(2)), Some(false));
    }

    #[test]
    fn unchecking_a_visible_item_removes_it() {
        let mut previous: VisibleState = [(id(1), true)].into_iter().collect();
        let mut selection = SelectionSet::from_ids([id(1)]);

        let current: VisibleState = [(id(1), false)].into_iter().collect();
        reconcile(&current, &mut previous, &mut selection);

        assert!(selection.is_empty());
    }

    #[test]
    fn off_screen_items_survive_filter_roundtrip() {
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::new();

        // item 1 checked while visible
        let full_view: VisibleState = [(id(1), true), (id(2), false)].into_iter().collect();
        reconcile(&full_view, &mut previous, &mut selection);
        assert!(selection.contains(id(1)));

        // a filter hides item 1; only item 2 renders, still unchecked
        let filtered: VisibleState = [(id(2), false)].into_iter().collect();
        reconcile(&filtered, &mut previous, &mut selection);
        assert!(selection.contains(id(1)), "hidden item must stay selected");

        // filter reverted: item 1 renders checked again, which is not a new add
        let restored: VisibleState = [(id(1), true), (id(2), false)].into_iter().collect();
        let before = selection.clone();
        reconcile(&restored, &mut previous, &mut selection);
        assert_eq!(selection, before);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::from_ids([id(9)]);

        let current: VisibleState = [(id(1), true), (id(2), false), (id(3), true)]
            .into_iter()
            .collect();
        reconcile(&current, &mut previous, &mut selection);
        let first = (selection.clone(), previous.clone());

        reconcile(&current, &mut previous, &mut selection);
        assert_eq!((selection, previous), first);
    }

    #[test]
    fn select_all_visible_only_touches_the_view() {
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::from_ids([id(50)]);

        select_all_visible([id(1), id(2)], &mut previous, &mut selection);

        assert!(selection.contains(id(1)));
        assert!(selection.contains(id(2)));
        assert!(selection.contains(id(50)), "off-screen id untouched");
    }

    #[test]
    fn clear_all_visible_keeps_off_screen_selection() {
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::new();
        select_all_visible([id(1), id(2), id(3)], &mut previous, &mut selection);

        clear_all_visible([id(1), id(2)], &mut previous, &mut selection);

        assert!(!selection.contains(id(1)));
        assert!(selection.contains(id(3)));
    }

    #[test]
    fn clear_everything_retires_ids_never_seen_in_a_view() {
        // loaded from a saved suggestion, never rendered
        let mut previous = VisibleState::new();
        let mut selection = SelectionSet::from_ids([id(7), id(8)]);

        clear_everything(&mut previous, &mut selection);

        assert!(selection.is_empty());
        assert_eq!(previous.get(id(7)), Some(false));
    }
}
