use std::path::PathBuf;

use anyhow::{Context, Result};

use carta_engine::LayoutMetrics;
use carta_providers::{CatalogSource, CsvCatalog, ImageDir, ImageLookup, NoImages};
use carta_store::SuggestionStore;
use carta_types::{
    Catalog, CategoryLexicon, OverrideMap, PriceColumn, PricingContext, DEFAULT_FACTOR,
};

use crate::args::{Cli, PricingArgs};
use crate::config::CartaConfig;

const DEFAULT_CATALOG: &str = "vinhos.csv";
const DEFAULT_IMAGES: &str = "imagens";
const DEFAULT_SUGGESTIONS: &str = "sugestoes";
const DEFAULT_TITLE: &str = "Sugestão Carta de Vinhos";

/// Everything a handler needs, assembled once per invocation.
/// Flag > config file > compiled-in default.
pub struct AppContext {
    pub catalog_path: PathBuf,
    pub images_dir: PathBuf,
    pub suggestions_dir: PathBuf,
    pub lexicon: CategoryLexicon,
    pub metrics: LayoutMetrics,
    pub title: String,
    pub footer_lines: Vec<String>,
    pub default_column: PriceColumn,
    pub default_factor: f64,
    pub default_photos: bool,
}

impl AppContext {
    pub fn new(cli: &Cli, config: CartaConfig) -> Self {
        let lexicon = config
            .categories
            .map(CategoryLexicon::new)
            .unwrap_or_else(|| CategoryLexicon::builtin().clone());

        Self {
            catalog_path: cli
                .catalog
                .clone()
                .or(config.catalog)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
            images_dir: cli
                .images
                .clone()
                .or(config.images)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES)),
            suggestions_dir: cli
                .suggestions
                .clone()
                .or(config.suggestions)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SUGGESTIONS)),
            lexicon,
            metrics: config.layout.unwrap_or_default(),
            title: config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            footer_lines: config.footer_lines.unwrap_or_else(default_footer_lines),
            default_column: config.column.unwrap_or_default(),
            default_factor: config.factor.unwrap_or(DEFAULT_FACTOR),
            default_photos: config.photos.unwrap_or(false),
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        CsvCatalog::new(&self.catalog_path)
            .load()
            .with_context(|| format!("failed to load catalog {}", self.catalog_path.display()))
    }

    /// Pricing context for one invocation.
    pub fn pricing_context(&self, args: &PricingArgs) -> PricingContext {
        PricingContext::new(
            args.column.unwrap_or(self.default_column),
            args.factor.unwrap_or(self.default_factor),
        )
    }

    /// Manual per-item adjustments from the repeatable override flags.
    pub fn overrides(&self, args: &PricingArgs) -> OverrideMap {
        let mut overrides = OverrideMap::default();
        for (id, factor) in &args.set_factor {
            overrides.set_factor((*id).into(), *factor);
        }
        for (id, price) in &args.set_price {
            overrides.set_sale_price((*id).into(), *price);
        }
        overrides
    }

    pub fn store(&self) -> SuggestionStore {
        SuggestionStore::new(&self.suggestions_dir)
    }

    pub fn image_lookup(&self, photos: bool) -> Box<dyn ImageLookup> {
        if photos {
            Box::new(ImageDir::new(&self.images_dir))
        } else {
            Box::new(NoImages)
        }
    }
}

fn default_footer_lines() -> Vec<String> {
    vec![
        "Ingá Distribuidora Ltda | CNPJ 05.390.477/0002-25 Rod BR 232, KM 18,5 - S/N- Manassu - CEP 54130-340 Jaboatão"
            .to_string(),
        "b2b.ingavinhos.com.br".to_string(),
    ]
}
