use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carta_types::{Catalog, CatalogItem, ItemId, PriceColumn, PriceTable};

/// Build a single catalog item with the given shape and a `preco1` value.
pub fn item(id: u64, code: &str, description: &str, category: &str, country: &str, base: f64) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        code: code.to_string(),
        description: description.to_string(),
        country: country.to_string(),
        region: String::new(),
        category: category.to_string(),
        varietals: Default::default(),
        maturation: None,
        prices: [(PriceColumn::List1, base)]
            .into_iter()
            .collect::<PriceTable>(),
    }
}

/// A small mixed catalog covering every canonical bucket boundary the
/// pipeline tests care about: two countries inside one category, a
/// category that needs keyword (not exact) matching, and an unrecognized
/// type.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        item(0, "407", "Cabernet Reserva", "Tinto", "Chile", 10.0),
        item(1, "212", "Chardonnay Gran Cru", "Branco", "Chile", 20.0),
        item(2, "318", "Malbec Clasico", "Vinho Tinto Seco", "Argentina", 5.0),
        item(3, "555", "Brut Imperial", "Espumante", "Brasil", 15.0),
        item(4, "601", "Laranja Natural", "Laranja", "Brasil", 12.0),
    ])
}

/// Write the sample catalog as a CSV sheet the providers can load.
/// Headers intentionally carry mixed case and padding, and one price
/// column is missing so backfill paths get exercised.
pub fn write_sample_sheet(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("vinhos.csv");
    let mut rows = String::from(
        "COD , Descricao,tipo,Pais,regiao,uva1,uva2,uva3,amadurecimento,preco1,preco2\n",
    );
    rows.push_str("407,Cabernet Reserva,Tinto,Chile,Maipo,Cabernet Sauvignon,,,12m carvalho,10.0,11.5\n");
    rows.push_str("212,Chardonnay Gran Cru,Branco,Chile,Casablanca,Chardonnay,,,,20.0,21.0\n");
    rows.push_str("318,Malbec Clasico,Vinho Tinto Seco,Argentina,Mendoza,Malbec,,,,5.0,abc\n");
    rows.push_str("555,Brut Imperial,Espumante,Brasil,Serra Gaucha,,,,,15.0,16.0\n");
    fs::write(&path, rows).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
