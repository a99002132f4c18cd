use serde::{Deserialize, Serialize};
use std::fmt;

use crate::price::PriceTable;

/// Stable catalog row identity, unique within a session and never reused.
///
/// Assigned by the catalog source from row position, so a selection saved
/// against one load of the sheet stays meaningful across reloads of the
/// same sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// One catalog row, immutable per render pass.
///
/// Manual price adjustments never mutate the item; they live out-of-band in
/// an [`crate::OverrideMap`] keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    /// Display label printed next to the sequence number. Not unique.
    pub code: String,
    pub description: String,
    pub country: String,
    pub region: String,
    /// Raw wine-type text as it appears in the source sheet.
    pub category: String,
    /// Up to three varietal tags; empty strings mean "unused slot".
    pub varietals: [String; 3],
    /// Maturation note; presence drives the barrel marker in output rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturation: Option<String>,
    pub prices: PriceTable,
}

impl CatalogItem {
    /// Non-empty varietal tags in slot order.
    pub fn varietal_tags(&self) -> impl Iterator<Item = &str> {
        self.varietals
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn has_maturation(&self) -> bool {
        self.maturation
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty())
    }
}

/// The full session catalog.
///
/// Loaded once per pass from the catalog source; session-registered items
/// are appended with the next free id and live only as long as the catalog
/// value itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    /// Next free id for session registration.
    pub fn next_id(&self) -> ItemId {
        let max = self.items.iter().map(|item| item.id.raw()).max();
        ItemId::new(max.map_or(0, |m| m + 1))
    }

    /// Append a session-registered item, assigning the next free id.
    /// Returns the id the item was stored under.
    pub fn register(&mut self, mut item: CatalogItem) -> ItemId {
        let id = self.next_id();
        item.id = id;
        self.items.push(item);
        id
    }
}
