use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use carta_engine::resolve;
use carta_types::CanonicalCategory;

use crate::args::ExportArgs;
use crate::context::AppContext;
use crate::handlers::{filter_set, ordered_selection, resolve_selection};
use crate::presentation::money;

/// Flat sheet export: the same ordered item stream as the paged document,
/// with category/country header rows instead of height-budget pagination.
pub fn handle(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let context = ctx.pricing_context(&args.pricing);
    let overrides = ctx.overrides(&args.pricing);

    let priced = resolve(catalog.items(), &context, &overrides)?;
    let filters = filter_set(&args.filters);
    let selection = resolve_selection(ctx, &priced, &args.selection, &filters)?;

    if selection.is_empty() {
        eprintln!("Nenhum item selecionado.");
        return Ok(());
    }

    let ordered = ordered_selection(ctx, &priced, &selection);
    let lookup = ctx.image_lookup(args.photos || ctx.default_photos);

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(["item", "descricao", "detalhe", "foto", "preco_base", "preco_venda"])?;

    let mut current_category: Option<CanonicalCategory> = None;
    let mut current_country: Option<String> = None;
    let mut sequence = 1u32;
    let mut exported = 0usize;

    for item in &ordered {
        let category = ctx.lexicon.classify(&item.item.category);
        if current_category.as_ref() != Some(&category) {
            writer.write_record([
                category.label().to_uppercase().as_str(),
                "",
                "",
                "",
                "",
                "",
            ])?;
            current_category = Some(category);
            current_country = None;
        }

        let same = current_country
            .as_deref()
            .is_some_and(|c| carta_engine::ordering::same_country(c, &item.item.country));
        if !same {
            writer.write_record([
                "",
                item.item.country.to_uppercase().as_str(),
                "",
                "",
                "",
                "",
            ])?;
            current_country = Some(item.item.country.clone());
        }

        let mut detail = format!("{} | {}", item.item.country, item.item.region);
        let varietals: Vec<&str> = item.item.varietal_tags().collect();
        if !varietals.is_empty() {
            detail.push_str(" | ");
            detail.push_str(&varietals.join(", "));
        }
        if item.item.has_maturation() {
            detail.push_str(" | 🛢");
        }

        let photo = if lookup.find_image(&item.item.code).is_some() {
            "●"
        } else {
            ""
        };

        writer.write_record([
            format!("{:02} ({})", sequence, item.item.code).as_str(),
            item.item.description.as_str(),
            detail.as_str(),
            photo,
            money(item.base_price).as_str(),
            money(item.sale_price).as_str(),
        ])?;

        sequence += 1;
        exported += 1;
    }

    writer.flush()?;

    if let Some(path) = &args.output {
        println!("Exportados {} item(ns) para {}", exported, path.display());
    }

    Ok(())
}
