pub mod export;
pub mod list;
pub mod render;
pub mod suggest;

use anyhow::Result;

use carta_engine::{
    filter, order, reconcile, select_all_visible, selected_subset, FilterSet, PricedItem,
    VisibleState,
};
use carta_types::SelectionSet;

use crate::args::{FilterArgs, SelectionArgs};
use crate::context::AppContext;

pub(crate) fn filter_set(args: &FilterArgs) -> FilterSet {
    FilterSet {
        term: args.term.clone(),
        country: args.country.clone(),
        category: args.category.clone(),
        description: None,
        region: args.region.clone(),
        code: args.code.clone(),
        price_min: args.price_min,
        price_max: args.price_max,
    }
}

/// Build the durable selection for one invocation.
///
/// A saved suggestion replaces the selection wholesale (the load
/// contract); `--all` and `--ids` then go through the same reconciliation
/// path an interactive grid would use, so the combinations compose.
pub(crate) fn resolve_selection(
    ctx: &AppContext,
    priced: &[PricedItem],
    args: &SelectionArgs,
    filters: &FilterSet,
) -> Result<SelectionSet> {
    let mut selection = match &args.suggestion {
        Some(name) => ctx.store().load(name)?,
        None => SelectionSet::new(),
    };
    let mut previous = VisibleState::new();

    if args.all {
        let visible = filter(priced, filters);
        select_all_visible(
            visible.iter().map(|p| p.id()),
            &mut previous,
            &mut selection,
        );
    }

    if !args.ids.is_empty() {
        let current = VisibleState::uniform(args.ids.iter().map(|id| (*id).into()), true);
        reconcile(&current, &mut previous, &mut selection);
    }

    Ok(selection)
}

/// The ordered, selected slice of the priced catalog.
pub(crate) fn ordered_selection(
    ctx: &AppContext,
    priced: &[PricedItem],
    selection: &SelectionSet,
) -> Vec<PricedItem> {
    let subset = selected_subset(priced, selection);
    order(&subset, &ctx.lexicon)
}
