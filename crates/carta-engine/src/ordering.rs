use carta_types::CategoryLexicon;

use crate::pricing::PricedItem;

/// Order items for output: canonical category rank, then country, then
/// description, both compared in their original casing. The sort is stable,
/// so exact duplicate keys keep their relative input order, and the
/// function is pure - ordering an already-ordered sequence is a no-op.
pub fn order(items: &[PricedItem], lexicon: &CategoryLexicon) -> Vec<PricedItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by_cached_key(|priced| {
        (
            lexicon.classify(&priced.item.category),
            priced.item.country.clone(),
            priced.item.description.clone(),
        )
    });
    ordered
}

/// Country grouping matches case-insensitively even though the sort key is
/// case-sensitive.
pub fn same_country(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
