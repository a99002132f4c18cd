use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carta_types::{Catalog, CatalogItem, ItemId, PriceColumn, PriceTable};

/// Tabular catalog acquisition: rows in, typed items out.
///
/// Implementations normalize whatever the backing format is so the engine
/// never sees a missing field - absent text columns become empty strings,
/// absent or malformed numbers become 0.0.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog>;
}

/// CSV-backed catalog source.
///
/// Headers are trimmed and lower-cased before lookup, so `COD ` and `cod`
/// address the same column. Item ids come from row position, which keeps a
/// saved selection meaningful across reloads of the same sheet.
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for CsvCatalog {
    fn load(&self) -> Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("failed to open catalog sheet {}", self.path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .context("catalog sheet has no header row")?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let column = |name: &str| headers.iter().position(|h| h == name);
        let col_cod = column("cod");
        let col_descricao = column("descricao");
        let col_pais = column("pais");
        let col_regiao = column("regiao");
        let col_tipo = column("tipo");
        let col_uvas = [column("uva1"), column("uva2"), column("uva3")];
        let col_amadurecimento = column("amadurecimento");
        let price_columns: Vec<(PriceColumn, Option<usize>)> = PriceColumn::ALL
            .into_iter()
            .map(|c| (c, column(c.key())))
            .collect();

        let mut items = Vec::new();
        for (row_index, record) in reader.records().enumerate() {
            let record = record.with_context(|| {
                format!("malformed row {} in {}", row_index + 1, self.path.display())
            })?;

            let text = |col: Option<usize>| {
                col.and_then(|ix| record.get(ix))
                    .unwrap_or("")
                    .trim()
                    .to_string()
            };

            let mut prices = PriceTable::default();
            for (price_column, col) in &price_columns {
                prices.set(*price_column, parse_price(&text(*col)));
            }

            let maturation = Some(text(col_amadurecimento)).filter(|m| !m.is_empty());

            items.push(CatalogItem {
                id: ItemId::new(row_index as u64),
                code: text(col_cod),
                description: text(col_descricao),
                country: text(col_pais),
                region: text(col_regiao),
                category: text(col_tipo),
                varietals: col_uvas.map(text),
                maturation,
                prices,
            });
        }

        Ok(Catalog::new(items))
    }
}

/// Coerce a raw price cell. Accepts a comma decimal separator; anything
/// unparseable becomes 0.0 rather than an error.
fn parse_price(raw: &str) -> f64 {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .or_else(|_| cleaned.replace(',', ".").parse::<f64>())
        .unwrap_or(0.0)
        .max(0.0)
}
