use std::fmt::Write as _;

use carta_engine::{Block, Page, ViewCounts};
use carta_types::CountLabel;

/// Fixed money convention: 2-digit rounding happens here, at formatting
/// time, never inside the engine.
pub fn money(value: f64) -> String {
    format!("R$ {:.2}", value)
}

pub fn timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// The grid caption line: per-label counts, view total, selection size,
/// active factor.
pub fn caption(view: &ViewCounts, factor: f64) -> String {
    format!(
        "{}: {} | {}: {} | {}: {} | {}: {} | Total: {} | Selecionados: {} | Fator: {:.2}",
        CountLabel::Whites.label(),
        view.counts.whites,
        CountLabel::Reds.label(),
        view.counts.reds,
        CountLabel::Roses.label(),
        view.counts.roses,
        CountLabel::Sparkling.label(),
        view.counts.sparkling,
        view.total,
        view.selected,
        factor
    )
}

/// Render the page/block stream as plain text, one page after another
/// separated by a form feed. The layout decided everything; this backend
/// only draws.
pub fn render_pages(
    pages: &[Page],
    title: &str,
    client: Option<&str>,
    footer_lines: &[String],
) -> String {
    let mut out = String::new();

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            out.push_str("\u{c}\n");
        }
        for block in &page.blocks {
            render_block(&mut out, block, title, client, footer_lines);
        }
    }

    out
}

fn render_block(
    out: &mut String,
    block: &Block,
    title: &str,
    client: Option<&str>,
    footer_lines: &[String],
) {
    match block {
        Block::DocumentHeader => {
            let _ = writeln!(out, "{}", title);
            if let Some(client) = client {
                let _ = writeln!(out, "Cliente: {}", client);
            }
            let _ = writeln!(out, "{}", "=".repeat(70));
        }
        Block::CategoryHeader { category } => {
            let _ = writeln!(out, "\n{}", category.label().to_uppercase());
        }
        Block::SubgroupHeader { country, .. } => {
            let _ = writeln!(out, "  {}", country.to_uppercase());
        }
        Block::ItemRow { entry, sequence } => {
            let item = &entry.priced.item;
            let _ = writeln!(
                out,
                "    {:02} ({}) {}",
                sequence, item.code, item.description
            );

            let mut detail = format!("      {} | {}", item.country, item.region);
            let varietals: Vec<&str> = item.varietal_tags().collect();
            if !varietals.is_empty() {
                let _ = write!(detail, " | {}", varietals.join(", "));
            }
            if item.has_maturation() {
                detail.push_str(" | 🛢");
            }
            let _ = writeln!(out, "{}", detail);

            let _ = writeln!(
                out,
                "      ({})  {}{}",
                money(entry.priced.base_price),
                money(entry.priced.sale_price),
                if entry.has_photo { "  [COM FOTO]" } else { "" }
            );
        }
        Block::Footer(summary) => {
            let _ = writeln!(out, "{}", "-".repeat(70));
            let _ = writeln!(out, "Gerado em: {}", timestamp(summary.generated_at));
            let _ = writeln!(
                out,
                "{}: {} | {}: {} | {}: {} | {}: {} | Total: {} | Fator: {:.2}",
                CountLabel::Whites.label(),
                summary.counts.whites,
                CountLabel::Reds.label(),
                summary.counts.reds,
                CountLabel::Roses.label(),
                summary.counts.roses,
                CountLabel::Sparkling.label(),
                summary.counts.sparkling,
                summary.total,
                summary.median_factor
            );
            for line in footer_lines {
                let _ = writeln!(out, "{}", line);
            }
        }
    }
}
