use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carta_types::{CanonicalCategory, CategoryCounts, CategoryLexicon};

use crate::ordering::same_country;
use crate::pricing::PricedItem;

/// Layout input: one ordered, selected, priced item plus the result of the
/// photo probe. The image lookup happens upstream so the layout pass stays
/// a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEntry {
    pub priced: PricedItem,
    pub has_photo: bool,
}

impl LayoutEntry {
    pub fn without_photo(priced: PricedItem) -> Self {
        Self {
            priced,
            has_photo: false,
        }
    }
}

/// Height budget knobs, in points.
///
/// Exact values are a rendering concern, not a layout invariant; the
/// defaults are tuned for an A4 point grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub page_height: f64,
    pub document_header_height: f64,
    pub footer_height: f64,
    pub category_header_height: f64,
    pub country_header_height: f64,
    pub row_height: f64,
    pub row_height_with_photo: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            page_height: 842.0,
            document_header_height: 80.0,
            footer_height: 100.0,
            category_header_height: 14.0,
            country_header_height: 12.0,
            row_height: 20.0,
            row_height_with_photo: 28.0,
        }
    }
}

impl LayoutMetrics {
    /// Height available for group headers and rows on every page.
    pub fn usable_height(&self) -> f64 {
        self.page_height - self.document_header_height - self.footer_height
    }

    fn row_height_for(&self, entry: &LayoutEntry) -> f64 {
        if entry.has_photo {
            self.row_height_with_photo
        } else {
            self.row_height
        }
    }
}

/// One renderable unit of the page stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    DocumentHeader,
    CategoryHeader {
        category: CanonicalCategory,
    },
    SubgroupHeader {
        category: CanonicalCategory,
        country: String,
    },
    ItemRow {
        entry: LayoutEntry,
        /// 1-based position across the whole document; never resets per
        /// page or per group.
        sequence: u32,
    },
    Footer(FooterSummary),
}

/// Snapshot stamped into a page footer: everything placed so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterSummary {
    pub counts: CategoryCounts,
    pub total: usize,
    /// Running median of the resolved factors of all items placed so far.
    pub median_factor: f64,
    pub generated_at: DateTime<Utc>,
}

/// An ordered block sequence ending in exactly one `Footer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn item_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::ItemRow { .. }))
            .count()
    }

    pub fn footer(&self) -> Option<&FooterSummary> {
        self.blocks.iter().rev().find_map(|b| match b {
            Block::Footer(summary) => Some(summary),
            _ => None,
        })
    }
}

/// Lay the ordered, selected, priced entries onto discrete pages.
///
/// Empty input yields zero pages - the caller treats that as "nothing to
/// render", not as a single empty page. Otherwise every page ends with a
/// footer carrying the running counts, the running median factor and the
/// supplied timestamp, and a new page re-opens with the document header
/// plus the headers of the group being continued.
pub fn layout(
    entries: &[LayoutEntry],
    metrics: &LayoutMetrics,
    lexicon: &CategoryLexicon,
    generated_at: DateTime<Utc>,
) -> Vec<Page> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut state = LayoutState::new(metrics, generated_at);
    state.open_page();

    for entry in entries {
        let category = lexicon.classify(&entry.priced.item.category);
        state.place(entry, category);
    }

    state.finish()
}

struct LayoutState<'a> {
    metrics: &'a LayoutMetrics,
    generated_at: DateTime<Utc>,
    pages: Vec<Page>,
    blocks: Vec<Block>,
    remaining: f64,
    sequence: u32,
    counts: CategoryCounts,
    factors: Vec<f64>,
    category: Option<CanonicalCategory>,
    country: Option<String>,
}

impl<'a> LayoutState<'a> {
    fn new(metrics: &'a LayoutMetrics, generated_at: DateTime<Utc>) -> Self {
        Self {
            metrics,
            generated_at,
            pages: Vec::new(),
            blocks: Vec::new(),
            remaining: 0.0,
            sequence: 1,
            counts: CategoryCounts::default(),
            factors: Vec::new(),
            category: None,
            country: None,
        }
    }

    fn open_page(&mut self) {
        self.blocks.push(Block::DocumentHeader);
        self.remaining = self.metrics.usable_height();
    }

    fn close_page(&mut self) {
        self.blocks.push(Block::Footer(self.summary()));
        let blocks = std::mem::take(&mut self.blocks);
        self.pages.push(Page { blocks });
    }

    fn summary(&self) -> FooterSummary {
        FooterSummary {
            counts: self.counts,
            total: self.counts.total(),
            median_factor: median(&self.factors),
            generated_at: self.generated_at,
        }
    }

    fn place(&mut self, entry: &LayoutEntry, category: CanonicalCategory) {
        let new_category = self.category.as_ref() != Some(&category);
        let new_country = new_category
            || !self
                .country
                .as_deref()
                .is_some_and(|c| same_country(c, &entry.priced.item.country));

        let row_height = self.metrics.row_height_for(entry);
        let mut needed = row_height;
        if new_category {
            needed += self.metrics.category_header_height;
        }
        if new_country {
            needed += self.metrics.country_header_height;
        }

        // Break before emitting headers so a group header is never left
        // orphaned at the bottom of a closed page. Headers of a group that
        // continues across the break are repeated on the fresh page.
        if self.remaining < needed {
            self.break_page(new_category, new_country);
        }

        if new_category {
            self.category = Some(category.clone());
            self.country = None;
            self.emit_category_header();
        }
        if new_country {
            self.country = Some(entry.priced.item.country.clone());
            self.emit_subgroup_header();
        }

        self.blocks.push(Block::ItemRow {
            entry: entry.clone(),
            sequence: self.sequence,
        });
        self.remaining -= row_height;
        self.sequence += 1;
        self.counts.bump(category.count_label());
        self.factors.push(entry.priced.factor);
    }

    fn break_page(&mut self, new_category: bool, new_country: bool) {
        self.close_page();
        self.open_page();

        // A continued group gets its headers again; a brand-new group emits
        // its own headers right after this, from place().
        if !new_category {
            self.emit_category_header();
            if !new_country {
                self.emit_subgroup_header();
            }
        }
    }

    fn emit_category_header(&mut self) {
        if let Some(category) = &self.category {
            self.blocks.push(Block::CategoryHeader {
                category: category.clone(),
            });
            self.remaining -= self.metrics.category_header_height;
        }
    }

    fn emit_subgroup_header(&mut self) {
        if let (Some(category), Some(country)) = (&self.category, &self.country) {
            self.blocks.push(Block::SubgroupHeader {
                category: category.clone(),
                country: country.clone(),
            });
            self.remaining -= self.metrics.country_header_height;
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.close_page();
        self.pages
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
