use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use carta_engine::{count_view, filter, resolve};
use carta_types::SelectionSet;

use crate::args::ListArgs;
use crate::context::AppContext;
use crate::handlers::filter_set;
use crate::presentation::{caption, money};

pub fn handle(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let context = ctx.pricing_context(&args.pricing);
    let overrides = ctx.overrides(&args.pricing);

    let priced = resolve(catalog.items(), &context, &overrides)?;
    let filters = filter_set(&args.filters);
    let visible = filter(&priced, &filters);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    let lookup = ctx.image_lookup(true);
    let use_color = std::io::stdout().is_terminal();

    let header = format!(
        "{:>5}  F  {:<6} {:<40} {:<14} {:>10} {:>10} {:>6}",
        "ID", "COD", "DESCRICAO", "PAIS", "BASE", "VENDA", "FATOR"
    );
    if use_color {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }

    for item in &visible {
        let photo = if lookup.find_image(&item.item.code).is_some() {
            "●"
        } else {
            " "
        };
        println!(
            "{:>5}  {}  {:<6} {:<40} {:<14} {:>10} {:>10} {:>6.2}",
            item.id().raw(),
            photo,
            item.item.code,
            truncate(&item.item.description, 40),
            truncate(&item.item.country, 14),
            money(item.base_price),
            money(item.sale_price),
            item.factor
        );
    }

    // The grid caption; a fresh CLI invocation has no durable selection.
    let view = count_view(&visible, &SelectionSet::new(), &ctx.lexicon);
    let line = caption(&view, context.global_factor());
    if use_color {
        println!("{}", line.dimmed());
    } else {
        println!("{}", line);
    }

    Ok(())
}

fn truncate(raw: &str, width: usize) -> String {
    if raw.chars().count() <= width {
        raw.to_string()
    } else {
        raw.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}
