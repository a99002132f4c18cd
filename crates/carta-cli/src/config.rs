use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use carta_engine::LayoutMetrics;
use carta_types::{LexiconRule, PriceColumn};

const DEFAULT_CONFIG_FILE: &str = "carta.toml";

/// Optional settings file. Every field has a compiled-in default, so an
/// absent file (or an empty one) is fully usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartaConfig {
    /// Catalog sheet path
    pub catalog: Option<PathBuf>,
    /// Product photo directory
    pub images: Option<PathBuf>,
    /// Saved suggestion directory
    pub suggestions: Option<PathBuf>,
    /// Default price table
    pub column: Option<PriceColumn>,
    /// Default global factor
    pub factor: Option<f64>,
    /// Insert photos by default
    pub photos: Option<bool>,
    /// Document title
    pub title: Option<String>,
    /// Branding lines printed under every footer
    pub footer_lines: Option<Vec<String>>,
    /// Page height budget knobs
    pub layout: Option<LayoutMetrics>,
    /// Replacement category keyword table, highest priority first
    pub categories: Option<Vec<LexiconRule>>,
}

/// Load settings. An explicit path must exist; the implicit ./carta.toml
/// is optional.
pub fn load(explicit: Option<&Path>) -> Result<CartaConfig> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(CartaConfig::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config {}", path.display()));
        }
    };

    toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}
