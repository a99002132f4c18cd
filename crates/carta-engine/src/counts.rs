use serde::Serialize;

use carta_types::{CategoryCounts, CategoryLexicon, SelectionSet};

use crate::pricing::PricedItem;

/// Tally of one rendered view, shown in the grid caption line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub counts: CategoryCounts,
    /// Items in the visible (filtered) set.
    pub total: usize,
    /// Size of the durable selection, visible or not.
    pub selected: usize,
}

/// Count the visible items by display label. Selection size is reported
/// for the whole session, not just the view.
pub fn count_view(
    visible: &[PricedItem],
    selection: &SelectionSet,
    lexicon: &CategoryLexicon,
) -> ViewCounts {
    let mut counts = CategoryCounts::default();
    for priced in visible {
        counts.bump(lexicon.count_label(&priced.item.category));
    }
    ViewCounts {
        counts,
        total: visible.len(),
        selected: selection.len(),
    }
}
