use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::item::ItemId;

/// Multiplier applied when neither the item override nor the context
/// carries a usable factor.
pub const DEFAULT_FACTOR: f64 = 2.0;

/// The fixed set of price tables available in the source sheet.
///
/// The source addresses these by column key (`preco1` .. `preco63`).
/// [`PriceColumn::FALLBACK`] is the designated fallback used whenever the
/// selected column carries no value for an item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PriceColumn {
    #[serde(rename = "preco1")]
    List1,
    #[serde(rename = "preco2")]
    List2,
    #[serde(rename = "preco15")]
    List15,
    #[serde(rename = "preco38")]
    List38,
    #[serde(rename = "preco39")]
    List39,
    #[serde(rename = "preco55")]
    List55,
    #[serde(rename = "preco63")]
    List63,
}

impl PriceColumn {
    pub const FALLBACK: PriceColumn = PriceColumn::List1;

    /// Every column in source-sheet order.
    pub const ALL: [PriceColumn; 7] = [
        PriceColumn::List1,
        PriceColumn::List2,
        PriceColumn::List15,
        PriceColumn::List38,
        PriceColumn::List39,
        PriceColumn::List55,
        PriceColumn::List63,
    ];

    /// Column key as it appears in the source sheet header.
    pub fn key(&self) -> &'static str {
        match self {
            PriceColumn::List1 => "preco1",
            PriceColumn::List2 => "preco2",
            PriceColumn::List15 => "preco15",
            PriceColumn::List38 => "preco38",
            PriceColumn::List39 => "preco39",
            PriceColumn::List55 => "preco55",
            PriceColumn::List63 => "preco63",
        }
    }
}

impl Default for PriceColumn {
    fn default() -> Self {
        PriceColumn::FALLBACK
    }
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PriceColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PriceColumn::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| format!("unknown price column: {}", s))
    }
}

/// Per-item prices keyed by column, all values >= 0.
///
/// Validated at load time by the catalog source; the engine never discovers
/// columns ad hoc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    entries: BTreeMap<PriceColumn, f64>,
}

impl PriceTable {
    pub fn get(&self, column: PriceColumn) -> Option<f64> {
        self.entries.get(&column).copied()
    }

    pub fn set(&mut self, column: PriceColumn, value: f64) {
        self.entries.insert(column, value.max(0.0));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PriceColumn, f64)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (PriceColumn, f64)>>(iter: T) -> Self {
        let mut table = PriceTable::default();
        for (column, value) in iter {
            table.set(column, value);
        }
        table
    }
}

/// Manual per-item adjustment. Both fields are independent; the last
/// meaningful edit wins per field, not per item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceOverride {
    /// Per-item factor; values <= 0 are ignored at resolution time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    /// Explicit sale price; wins over any factor while set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

impl PriceOverride {
    pub fn is_empty(&self) -> bool {
        self.factor.is_none() && self.sale_price.is_none()
    }
}

/// Session-lived manual adjustments keyed by item id.
///
/// Caller-owned state: the resolver reads it, grid edits write it. Entries
/// survive catalog reloads as long as ids are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideMap {
    entries: HashMap<ItemId, PriceOverride>,
}

impl OverrideMap {
    pub fn get(&self, id: ItemId) -> Option<&PriceOverride> {
        self.entries.get(&id)
    }

    pub fn set_factor(&mut self, id: ItemId, factor: f64) {
        self.entries.entry(id).or_default().factor = Some(factor);
    }

    pub fn set_sale_price(&mut self, id: ItemId, price: f64) {
        self.entries.entry(id).or_default().sale_price = Some(price);
    }

    pub fn clear_factor(&mut self, id: ItemId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.factor = None;
            if entry.is_empty() {
                self.entries.remove(&id);
            }
        }
    }

    pub fn clear_sale_price(&mut self, id: ItemId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.sale_price = None;
            if entry.is_empty() {
                self.entries.remove(&id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Settings for one pricing pass: which table to read and the global
/// multiplier substituted wherever an item has no usable factor of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    pub column: PriceColumn,
    global_factor: f64,
}

impl PricingContext {
    /// A non-positive or non-finite factor is coerced to [`DEFAULT_FACTOR`];
    /// a factor never reaches the output as zero or negative.
    pub fn new(column: PriceColumn, global_factor: f64) -> Self {
        let global_factor = if global_factor.is_finite() && global_factor > 0.0 {
            global_factor
        } else {
            DEFAULT_FACTOR
        };
        Self {
            column,
            global_factor,
        }
    }

    pub fn global_factor(&self) -> f64 {
        self.global_factor
    }
}

impl Default for PricingContext {
    fn default() -> Self {
        Self::new(PriceColumn::default(), DEFAULT_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_parses_from_source_key() {
        assert_eq!("preco15".parse::<PriceColumn>(), Ok(PriceColumn::List15));
        assert_eq!(" PRECO63 ".parse::<PriceColumn>(), Ok(PriceColumn::List63));
        assert!("preco99".parse::<PriceColumn>().is_err());
    }

    #[test]
    fn fallback_column_is_the_default() {
        assert_eq!(PriceColumn::default(), PriceColumn::FALLBACK);
        assert_eq!(PriceColumn::FALLBACK.key(), "preco1");
    }

    #[test]
    fn context_coerces_bad_factors() {
        assert_eq!(
            PricingContext::new(PriceColumn::List1, 0.0).global_factor(),
            DEFAULT_FACTOR
        );
        assert_eq!(
            PricingContext::new(PriceColumn::List1, -3.0).global_factor(),
            DEFAULT_FACTOR
        );
        assert_eq!(
            PricingContext::new(PriceColumn::List1, f64::NAN).global_factor(),
            DEFAULT_FACTOR
        );
        assert_eq!(
            PricingContext::new(PriceColumn::List1, 2.5).global_factor(),
            2.5
        );
    }

    #[test]
    fn override_map_edits_are_per_field() {
        let mut overrides = OverrideMap::default();
        let id = ItemId::new(3);

        overrides.set_sale_price(id, 50.0);
        overrides.set_factor(id, 3.0);

        let entry = overrides.get(id).unwrap();
        assert_eq!(entry.sale_price, Some(50.0));
        assert_eq!(entry.factor, Some(3.0));

        overrides.clear_sale_price(id);
        assert_eq!(overrides.get(id).unwrap().factor, Some(3.0));

        overrides.clear_factor(id);
        assert!(overrides.get(id).is_none());
        assert!(overrides.is_empty());
    }

    #[test]
    fn price_table_clamps_negative_values() {
        let mut table = PriceTable::default();
        table.set(PriceColumn::List2, -1.0);
        assert_eq!(table.get(PriceColumn::List2), Some(0.0));
    }
}
