//! Jotpad CLI - Markdown notes from the terminal
//!
//! Every invocation builds one note store over the local notes file, runs a
//! single command against it, and exits.

mod cli;
mod commands;
mod config;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::preview::run_preview;
use crate::commands::search::run_search;
use crate::commands::show::run_show;
use crate::config::{resolve_data_dir, CliConfig};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jotpad=info,jot=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;
    let data_dir = resolve_data_dir(cli.data_dir, &config);
    let editor = config.editor();

    match cli.command {
        Some(Commands::Add { title, content }) => {
            run_add(&content, title.as_deref(), editor.as_deref(), &data_dir)?;
        }
        Some(Commands::List { query, limit, json }) => {
            run_list(query.as_deref(), limit, json, &data_dir)?;
        }
        Some(Commands::Search { query, limit, json }) => {
            run_search(&query, limit, json, &data_dir)?;
        }
        Some(Commands::Show { id }) => run_show(&id, &data_dir)?,
        Some(Commands::Preview { id, output }) => {
            run_preview(&id, output.as_deref(), &data_dir)?;
        }
        Some(Commands::Edit { id, title }) => {
            run_edit(&id, title.as_deref(), editor.as_deref(), &data_dir)?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, &data_dir)?,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &data_dir)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, &data_dir)?,
        None => {
            // Quick capture mode: jot "my thought"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(&cli.note, None, editor.as_deref(), &data_dir)?;
            }
        }
    }

    Ok(())
}
