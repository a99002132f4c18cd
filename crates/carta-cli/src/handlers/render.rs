use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;

use carta_engine::{layout, resolve, LayoutEntry};

use crate::args::RenderArgs;
use crate::context::AppContext;
use crate::handlers::{filter_set, ordered_selection, resolve_selection};
use crate::presentation::render_pages;

pub fn handle(ctx: &AppContext, args: RenderArgs) -> Result<()> {
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
    let photos = args.photos || ctx.default_photos;
    let lookup = ctx.image_lookup(photos);

    let entries: Vec<LayoutEntry> = ordered
        .into_iter()
        .map(|item| {
            let has_photo = lookup.find_image(&item.item.code).is_some();
            LayoutEntry {
                priced: item,
                has_photo,
            }
        })
        .collect();

    let pages = layout(&entries, &ctx.metrics, &ctx.lexicon, Utc::now());
    if pages.is_empty() {
        // selection held only ids no longer present in the catalog
        eprintln!("Nenhum item selecionado.");
        return Ok(());
    }

    let title = args.title.as_deref().unwrap_or(&ctx.title);
    let text = render_pages(&pages, title, args.client.as_deref(), &ctx.footer_lines);

    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Documento com {} página(s) escrito em {}",
                pages.len(),
                path.display()
            );
        }
        None => print!("{}", text),
    }

    Ok(())
}
