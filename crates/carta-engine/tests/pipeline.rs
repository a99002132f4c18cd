// Full resolve -> order -> select -> layout passes over a small catalog.

use chrono::{TimeZone, Utc};

use carta_engine::{
    count_view, filter, layout, order, reconcile, resolve, selected_subset, Block, FilterSet,
    LayoutEntry, LayoutMetrics, VisibleState,
};
use carta_types::{
    CategoryLexicon, ItemId, OverrideMap, PriceColumn, PricingContext, SelectionSet,
};
use carta_testing::{item, sample_catalog};

fn stamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

#[test]
fn three_item_scenario_orders_and_prices_as_documented() {
    // A: Tinto/Chile, base 10, no overrides
    // B: Branco/Chile, base 20, explicit sale price 50
    // C: Tinto/Argentina, base 5, factor 3
    let items = vec![
        item(0, "A", "Vinho A", "Tinto", "Chile", 10.0),
        item(1, "B", "Vinho B", "Branco", "Chile", 20.0),
        item(2, "C", "Vinho C", "Tinto", "Argentina", 5.0),
    ];
    let mut overrides = OverrideMap::default();
    overrides.set_sale_price(ItemId::new(1), 50.0);
    overrides.set_factor(ItemId::new(2), 3.0);
    let context = PricingContext::new(PriceColumn::List1, 2.0);

    let priced = resolve(&items, &context, &overrides).unwrap();
    let ordered = order(&priced, CategoryLexicon::builtin());

    let codes: Vec<&str> = ordered.iter().map(|p| p.item.code.as_str()).collect();
    assert_eq!(codes, vec!["B", "C", "A"]);

    let sales: Vec<f64> = ordered.iter().map(|p| p.sale_price).collect();
    assert_eq!(sales, vec![50.0, 15.0, 20.0]);
}

#[test]
fn full_pass_produces_consistent_pages() {
    let catalog = sample_catalog();
    let context = PricingContext::default();
    let overrides = OverrideMap::default();
    let lexicon = CategoryLexicon::builtin();

    let priced = resolve(catalog.items(), &context, &overrides).unwrap();

    // user checks everything currently visible
    let mut previous = VisibleState::new();
    let mut selection = SelectionSet::new();
    let current: VisibleState = priced.iter().map(|p| (p.id(), true)).collect();
    reconcile(&current, &mut previous, &mut selection);
    assert_eq!(selection.len(), catalog.len());

    let subset = selected_subset(&priced, &selection);
    let ordered = order(&subset, lexicon);
    let entries: Vec<LayoutEntry> = ordered.into_iter().map(LayoutEntry::without_photo).collect();

    let pages = layout(&entries, &LayoutMetrics::default(), lexicon, stamp());
    assert_eq!(pages.len(), 1);

    let footer = pages[0].footer().unwrap();
    assert_eq!(footer.total, catalog.len());
    assert_eq!(footer.counts.reds, 2);
    assert_eq!(footer.counts.whites, 1);
    assert_eq!(footer.counts.sparkling, 1);
    assert_eq!(footer.counts.other, 1);

    // sparkling leads the document order
    let first_row = pages[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::ItemRow { entry, .. } => Some(entry.priced.item.code.as_str()),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_row, "555");
}

#[test]
fn filtered_view_feeds_reconciliation_without_losing_selection() {
    let catalog = sample_catalog();
    let priced = resolve(
        catalog.items(),
        &PricingContext::default(),
        &OverrideMap::default(),
    )
    .unwrap();
    let lexicon = CategoryLexicon::builtin();

    let mut previous = VisibleState::new();
    let mut selection = SelectionSet::new();

    // check the two Chilean wines while a country filter is active
    let chile = FilterSet {
        country: Some("Chile".to_string()),
        ..Default::default()
    };
    let visible = filter(&priced, &chile);
    let current: VisibleState = visible.iter().map(|p| (p.id(), true)).collect();
    reconcile(&current, &mut previous, &mut selection);
    assert_eq!(selection.len(), 2);

    // switch to Argentina; the Chilean picks are off-screen but durable
    let argentina = FilterSet {
        country: Some("Argentina".to_string()),
        ..Default::default()
    };
    let visible = filter(&priced, &argentina);
    let current: VisibleState = visible.iter().map(|p| (p.id(), false)).collect();
    reconcile(&current, &mut previous, &mut selection);
    assert_eq!(selection.len(), 2);

    let view = count_view(&visible, &selection, lexicon);
    assert_eq!(view.total, 1);
    assert_eq!(view.selected, 2);
}

#[test]
fn stale_selection_ids_are_inert_in_output() {
    let catalog = sample_catalog();
    let priced = resolve(
        catalog.items(),
        &PricingContext::default(),
        &OverrideMap::default(),
    )
    .unwrap();

    let selection = SelectionSet::from_ids([ItemId::new(0), ItemId::new(4321)]);
    let subset = selected_subset(&priced, &selection);
    assert_eq!(subset.len(), 1);

    let lexicon = CategoryLexicon::builtin();
    let entries: Vec<LayoutEntry> = order(&subset, lexicon)
        .into_iter()
        .map(LayoutEntry::without_photo)
        .collect();
    let pages = layout(&entries, &LayoutMetrics::default(), lexicon, stamp());
    assert_eq!(pages.last().unwrap().footer().unwrap().total, 1);
}

#[test]
fn empty_selection_renders_nothing() {
    let pages = layout(
        &[],
        &LayoutMetrics::default(),
        CategoryLexicon::builtin(),
        stamp(),
    );
    assert!(pages.is_empty());
}
