use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use carta_types::{ItemId, SelectionSet};

use crate::args::SuggestCommand;
use crate::context::AppContext;

pub fn handle(ctx: &AppContext, command: SuggestCommand) -> Result<()> {
    let store = ctx.store();
    let use_color = std::io::stdout().is_terminal();

    match command {
        SuggestCommand::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("Nenhuma sugestão salva.");
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        SuggestCommand::Save { name, ids } => {
            let selection: SelectionSet = ids.into_iter().map(ItemId::new).collect();
            store.save(&name, &selection)?;
            let total = store.load(&name)?.len();
            let message = format!("Sugestão '{}' salva com {} item(ns).", name, total);
            if use_color {
                println!("{}", message.green());
            } else {
                println!("{}", message);
            }
        }
        SuggestCommand::Show { name } => {
            let selection = store.load(&name)?;
            if selection.is_empty() {
                println!("Sugestão '{}' vazia ou inexistente.", name);
            } else {
                let ids: Vec<String> = selection.iter().map(|id| id.to_string()).collect();
                println!("{}", ids.join(","));
            }
        }
        SuggestCommand::Delete { name } => {
            store.delete(&name)?;
            let message = format!("Sugestão '{}' excluída.", name);
            if use_color {
                println!("{}", message.green());
            } else {
                println!("{}", message);
            }
        }
    }

    Ok(())
}
