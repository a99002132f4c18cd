mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod presentation;

pub use args::{Cli, Command, SuggestCommand};
pub use commands::run;
