use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed display-order bucket for a wine type.
///
/// Variant declaration order is the document order, so the derived `Ord` is
/// the canonical rank; `Unrecognized` buckets sort after every canonical
/// bucket, alphabetically by their title-cased label.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCategory {
    Sparkling,
    White,
    Rose,
    Red,
    Frizzante,
    Fortified,
    Dessert,
    Liqueur,
    /// Pass-through bucket for categories no lexicon rule matched,
    /// carrying the title-cased raw text.
    Unrecognized(String),
}

impl CanonicalCategory {
    /// Portuguese display label, as printed in category headers.
    pub fn label(&self) -> &str {
        match self {
            CanonicalCategory::Sparkling => "Espumante",
            CanonicalCategory::White => "Branco",
            CanonicalCategory::Rose => "Rosé",
            CanonicalCategory::Red => "Tinto",
            CanonicalCategory::Frizzante => "Frisante",
            CanonicalCategory::Fortified => "Fortificado",
            CanonicalCategory::Dessert => "Sobremesa",
            CanonicalCategory::Liqueur => "Licoroso",
            CanonicalCategory::Unrecognized(title) => title,
        }
    }

    /// Footer/caption bucket this category tallies under.
    pub fn count_label(&self) -> CountLabel {
        match self {
            CanonicalCategory::White => CountLabel::Whites,
            CanonicalCategory::Red => CountLabel::Reds,
            CanonicalCategory::Rose => CountLabel::Roses,
            CanonicalCategory::Sparkling => CountLabel::Sparkling,
            _ => CountLabel::Other,
        }
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One classification rule: a lower-cased keyword and the bucket it maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconRule {
    pub keyword: String,
    pub category: CanonicalCategory,
}

impl LexiconRule {
    pub fn new(keyword: impl Into<String>, category: CanonicalCategory) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            category,
        }
    }
}

/// Priority-ordered keyword table mapping raw wine-type text to buckets.
///
/// Matching is case-insensitive substring containment; the first rule that
/// matches wins, so narrower keywords must precede broader ones. The table
/// is replaceable configuration data, not hard-coded behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLexicon {
    rules: Vec<LexiconRule>,
}

static BUILTIN: Lazy<CategoryLexicon> = Lazy::new(|| {
    CategoryLexicon::new(vec![
        LexiconRule::new("espumante", CanonicalCategory::Sparkling),
        LexiconRule::new("champagne", CanonicalCategory::Sparkling),
        LexiconRule::new("branco", CanonicalCategory::White),
        LexiconRule::new("rosé", CanonicalCategory::Rose),
        LexiconRule::new("rose", CanonicalCategory::Rose),
        LexiconRule::new("rosado", CanonicalCategory::Rose),
        LexiconRule::new("tinto", CanonicalCategory::Red),
        LexiconRule::new("frisante", CanonicalCategory::Frizzante),
        LexiconRule::new("frizzante", CanonicalCategory::Frizzante),
        LexiconRule::new("fortificado", CanonicalCategory::Fortified),
        LexiconRule::new("sobremesa", CanonicalCategory::Dessert),
        LexiconRule::new("licor", CanonicalCategory::Liqueur),
    ])
});

impl CategoryLexicon {
    pub fn new(rules: Vec<LexiconRule>) -> Self {
        Self { rules }
    }

    /// Compiled-in table tuned for the distributor's Portuguese sheet.
    pub fn builtin() -> &'static CategoryLexicon {
        &BUILTIN
    }

    pub fn rules(&self) -> &[LexiconRule] {
        &self.rules
    }

    /// Total classification: every raw category maps to some bucket.
    pub fn classify(&self, raw: &str) -> CanonicalCategory {
        let needle = raw.trim().to_lowercase();
        for rule in &self.rules {
            if !rule.keyword.is_empty() && needle.contains(&rule.keyword) {
                return rule.category.clone();
            }
        }
        CanonicalCategory::Unrecognized(title_case(raw.trim()))
    }

    /// Footer/caption bucket for a raw category.
    pub fn count_label(&self, raw: &str) -> CountLabel {
        self.classify(raw).count_label()
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The small fixed label set footers and captions tally against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountLabel {
    Whites,
    Reds,
    Roses,
    Sparkling,
    Other,
}

impl CountLabel {
    /// Portuguese display label, matching the printed footer line.
    pub fn label(&self) -> &'static str {
        match self {
            CountLabel::Whites => "Brancos",
            CountLabel::Reds => "Tintos",
            CountLabel::Roses => "Rosés",
            CountLabel::Sparkling => "Espumantes",
            CountLabel::Other => "Outros",
        }
    }
}

/// Running tallies by display label. Never reset across page breaks; a
/// footer reports the counts of everything placed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub whites: usize,
    pub reds: usize,
    pub roses: usize,
    pub sparkling: usize,
    pub other: usize,
}

impl CategoryCounts {
    pub fn bump(&mut self, label: CountLabel) {
        match label {
            CountLabel::Whites => self.whites += 1,
            CountLabel::Reds => self.reds += 1,
            CountLabel::Roses => self.roses += 1,
            CountLabel::Sparkling => self.sparkling += 1,
            CountLabel::Other => self.other += 1,
        }
    }

    pub fn get(&self, label: CountLabel) -> usize {
        match label {
            CountLabel::Whites => self.whites,
            CountLabel::Reds => self.reds,
            CountLabel::Roses => self.roses,
            CountLabel::Sparkling => self.sparkling,
            CountLabel::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.whites + self.reds + self.roses + self.sparkling + self.other
    }
}
