use serde::Serialize;

use carta_types::{
    CatalogItem, Error, ItemId, OverrideMap, PriceColumn, PricingContext, Result,
};

/// A catalog item with its resolved base/sale price pair.
///
/// Derived per pass, never stored: prices are always recomputed from the
/// current catalog, context and overrides, so there is no staleness window.
/// Values keep full precision; 2-digit rounding happens only at formatting
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItem {
    pub item: CatalogItem,
    pub base_price: f64,
    /// The factor that produced `sale_price` (or would have, had no
    /// explicit price override been set).
    pub factor: f64,
    pub sale_price: f64,
}

impl PricedItem {
    pub fn id(&self) -> ItemId {
        self.item.id
    }
}

/// Resolve prices for a slice of items. Pure; fails only when an item has
/// a value in neither the selected column nor the fallback column.
pub fn resolve(
    items: &[CatalogItem],
    context: &PricingContext,
    overrides: &OverrideMap,
) -> Result<Vec<PricedItem>> {
    items
        .iter()
        .map(|item| resolve_one(item, context, overrides))
        .collect()
}

/// Resolve one item.
///
/// Precedence: explicit sale price > per-item factor > global factor.
/// A merely-missing selected column falls back silently to
/// [`PriceColumn::FALLBACK`].
pub fn resolve_one(
    item: &CatalogItem,
    context: &PricingContext,
    overrides: &OverrideMap,
) -> Result<PricedItem> {
    let base_price = item
        .prices
        .get(context.column)
        .or_else(|| item.prices.get(PriceColumn::FALLBACK))
        .ok_or(Error::MissingPriceColumn {
            item: item.id,
            column: PriceColumn::FALLBACK,
        })?;

    let manual = overrides.get(item.id);

    let factor = manual
        .and_then(|m| m.factor)
        .filter(|f| f.is_finite() && *f > 0.0)
        .unwrap_or_else(|| context.global_factor());

    let sale_price = manual
        .and_then(|m| m.sale_price)
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(base_price * factor);

    Ok(PricedItem {
        item: item.clone(),
        base_price,
        factor,
        sale_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_types::PriceTable;

    fn item(id: u64, prices: &[(PriceColumn, f64)]) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            code: id.to_string(),
            description: format!("Item {}", id),
            country: "Chile".to_string(),
            region: String::new(),
            category: "Tinto".to_string(),
            varietals: Default::default(),
            maturation: None,
            prices: prices.iter().copied().collect::<PriceTable>(),
        }
    }

    #[test]
    fn sale_price_is_base_times_global_factor() {
        let it = item(1, &[(PriceColumn::List1, 10.0)]);
        let ctx = PricingContext::new(PriceColumn::List1, 2.0);

        let priced = resolve_one(&it, &ctx, &OverrideMap::default()).unwrap();
        assert_eq!(priced.base_price, 10.0);
        assert_eq!(priced.sale_price, 20.0);
        assert_eq!(priced.factor, 2.0);
    }

    #[test]
    fn missing_selected_column_falls_back_silently() {
        let it = item(1, &[(PriceColumn::List1, 8.0)]);
        let ctx = PricingContext::new(PriceColumn::List55, 2.0);

        let priced = resolve_one(&it, &ctx, &OverrideMap::default()).unwrap();
        assert_eq!(priced.base_price, 8.0);
    }

    #[test]
    fn missing_fallback_column_is_fatal() {
        let it = item(1, &[(PriceColumn::List55, 8.0)]);
        let ctx = PricingContext::new(PriceColumn::List2, 2.0);

        let err = resolve_one(&it, &ctx, &OverrideMap::default()).unwrap_err();
        assert!(matches!(err, Error::MissingPriceColumn { .. }));
    }

    #[test]
    fn explicit_price_wins_over_later_factor_edit() {
        let it = item(1, &[(PriceColumn::List1, 10.0)]);
        let ctx = PricingContext::new(PriceColumn::List1, 2.0);
        let mut overrides = OverrideMap::default();

        overrides.set_sale_price(it.id, 50.0);
        overrides.set_factor(it.id, 3.0);

        let priced = resolve_one(&it, &ctx, &overrides).unwrap();
        assert_eq!(priced.sale_price, 50.0);
        assert_eq!(priced.factor, 3.0);
    }

    #[test]
    fn clearing_explicit_price_reactivates_the_factor() {
        let it = item(1, &[(PriceColumn::List1, 10.0)]);
        let ctx = PricingContext::new(PriceColumn::List1, 2.0);
        let mut overrides = OverrideMap::default();

        overrides.set_sale_price(it.id, 50.0);
        overrides.set_factor(it.id, 3.0);
        overrides.clear_sale_price(it.id);

        let priced = resolve_one(&it, &ctx, &overrides).unwrap();
        assert_eq!(priced.sale_price, 30.0);
    }

    #[test]
    fn non_positive_override_factor_uses_global() {
        let it = item(1, &[(PriceColumn::List1, 10.0)]);
        let ctx = PricingContext::new(PriceColumn::List1, 2.0);
        let mut overrides = OverrideMap::default();
        overrides.set_factor(it.id, 0.0);

        let priced = resolve_one(&it, &ctx, &overrides).unwrap();
        assert_eq!(priced.sale_price, 20.0);
        assert_eq!(priced.factor, 2.0);
    }

    #[test]
    fn sale_price_stays_positive_for_positive_base() {
        let it = item(1, &[(PriceColumn::List1, 0.5)]);
        let ctx = PricingContext::new(PriceColumn::List1, -4.0); // coerced to default
        let priced = resolve_one(&it, &ctx, &OverrideMap::default()).unwrap();
        assert!(priced.sale_price > 0.0);
    }

    #[test]
    fn resolve_keeps_input_order() {
        let items = vec![
            item(2, &[(PriceColumn::List1, 1.0)]),
            item(0, &[(PriceColumn::List1, 2.0)]),
        ];
        let ctx = PricingContext::default();

        let priced = resolve(&items, &ctx, &OverrideMap::default()).unwrap();
        let ids: Vec<u64> = priced.iter().map(|p| p.id().raw()).collect();
        assert_eq!(ids, vec![2, 0]);
    }
}
