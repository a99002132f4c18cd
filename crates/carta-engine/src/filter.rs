use serde::{Deserialize, Serialize};

use crate::pricing::PricedItem;

/// Grid filter values. Empty/absent fields mean "no constraint"; a price
/// bound of zero is treated as unset, matching the grid's behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Case-insensitive term matched against every text field.
    pub term: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub region: Option<String>,
    pub code: Option<String>,
    /// Lower bound on the base price.
    pub price_min: Option<f64>,
    /// Upper bound on the base price; zero means unbounded.
    pub price_max: Option<f64>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self == &FilterSet::default()
    }

    pub fn matches(&self, priced: &PricedItem) -> bool {
        let item = &priced.item;

        if let Some(term) = non_blank(&self.term) {
            let needle = term.to_lowercase();
            let hit = [
                item.code.as_str(),
                item.description.as_str(),
                item.country.as_str(),
                item.region.as_str(),
                item.category.as_str(),
                item.maturation.as_deref().unwrap_or(""),
            ]
            .into_iter()
            .chain(item.varietal_tags())
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(country) = non_blank(&self.country) {
            if item.country != country {
                return false;
            }
        }
        if let Some(category) = non_blank(&self.category) {
            if item.category != category {
                return false;
            }
        }
        if let Some(description) = non_blank(&self.description) {
            if item.description != description {
                return false;
            }
        }
        if let Some(region) = non_blank(&self.region) {
            if item.region != region {
                return false;
            }
        }
        if let Some(code) = non_blank(&self.code) {
            if item.code != code {
                return false;
            }
        }

        if let Some(min) = self.price_min.filter(|m| *m > 0.0) {
            if priced.base_price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max.filter(|m| *m > 0.0) {
            if priced.base_price > max {
                return false;
            }
        }

        true
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// The visible subset of a priced catalog under the active filters.
/// Pure; input order is preserved.
pub fn filter(items: &[PricedItem], filters: &FilterSet) -> Vec<PricedItem> {
    items
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}
