use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use carta_types::PriceColumn;

#[derive(Parser)]
#[command(name = "carta")]
#[command(
    about = "Turn a flat wine catalog into a curated, priced, paginated sales document",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to ./carta.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog sheet (CSV)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Product photo directory
    #[arg(long, global = true)]
    pub images: Option<PathBuf>,

    /// Saved suggestion directory
    #[arg(long, global = true)]
    pub suggestions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the filtered catalog grid with resolved prices
    List(ListArgs),
    /// Render the paged sales document for a selection
    Render(RenderArgs),
    /// Export the flat sheet (CSV) for a selection
    Export(ExportArgs),
    /// Manage saved suggestions
    Suggest {
        #[command(subcommand)]
        command: SuggestCommand,
    },
}

#[derive(Args)]
pub struct PricingArgs {
    /// Price table to read (preco1 .. preco63)
    #[arg(long, value_parser = parse_column)]
    pub column: Option<PriceColumn>,

    /// Global multiplier applied where no item factor exists
    #[arg(long)]
    pub factor: Option<f64>,

    /// Per-item factor override, id=factor (repeatable)
    #[arg(long = "set-factor", value_name = "ID=FACTOR", value_parser = parse_assignment)]
    pub set_factor: Vec<(u64, f64)>,

    /// Per-item sale price override, id=price (repeatable)
    #[arg(long = "set-price", value_name = "ID=PRICE", value_parser = parse_assignment)]
    pub set_price: Vec<(u64, f64)>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Search term matched against every text field
    #[arg(long)]
    pub term: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Raw wine-type text, matched exactly
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub code: Option<String>,

    /// Lower bound on the base price
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Upper bound on the base price (0 = unbounded)
    #[arg(long)]
    pub price_max: Option<f64>,
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Item ids, comma separated (e.g. 1,4,9)
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<u64>,

    /// Use a saved suggestion as the selection
    #[arg(long)]
    pub suggestion: Option<String>,

    /// Select every row matching the active filters
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub pricing: PricingArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Machine-readable output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub pricing: PricingArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Client name printed under the title
    #[arg(long)]
    pub client: Option<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Insert product photos where available
    #[arg(long)]
    pub photos: bool,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub pricing: PricingArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Insert photo markers where a product photo exists
    #[arg(long)]
    pub photos: bool,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum SuggestCommand {
    /// Name the saved suggestions
    List,
    /// Save ids under a name, merging with an existing list of that name
    Save {
        name: String,
        /// Item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,
    },
    /// Print the ids saved under a name
    Show { name: String },
    /// Remove a saved suggestion
    Delete { name: String },
}

fn parse_column(raw: &str) -> Result<PriceColumn, String> {
    PriceColumn::from_str(raw)
}

/// Parse an `id=value` pair for the per-item override flags.
fn parse_assignment(raw: &str) -> Result<(u64, f64), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", raw))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid item id in '{}'", raw))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid value in '{}'", raw))?;
    Ok((id, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parser_accepts_id_value_pairs() {
        assert_eq!(parse_assignment("3=2.5"), Ok((3, 2.5)));
        assert_eq!(parse_assignment(" 7 = 50 "), Ok((7, 50.0)));
        assert!(parse_assignment("x=1").is_err());
        assert!(parse_assignment("3").is_err());
    }

    #[test]
    fn cli_parses_a_render_invocation() {
        let cli = Cli::try_parse_from([
            "carta",
            "render",
            "--ids",
            "1,2,3",
            "--column",
            "preco2",
            "--factor",
            "2.5",
            "--set-price",
            "2=50",
            "--photos",
        ])
        .unwrap();

        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.selection.ids, vec![1, 2, 3]);
                assert_eq!(args.pricing.column, Some(PriceColumn::List2));
                assert_eq!(args.pricing.set_price, vec![(2, 50.0)]);
                assert!(args.photos);
            }
            _ => panic!("expected render"),
        }
    }
}
