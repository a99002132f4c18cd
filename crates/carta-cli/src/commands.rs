use anyhow::Result;

use crate::args::{Cli, Command};
use crate::config;
use crate::context::AppContext;
use crate::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let settings = config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(&cli, settings);

    match cli.command {
        Command::List(args) => handlers::list::handle(&ctx, args),
        Command::Render(args) => handlers::render::handle(&ctx, args),
        Command::Export(args) => handlers::export::handle(&ctx, args),
        Command::Suggest { command } => handlers::suggest::handle(&ctx, command),
    }
}
