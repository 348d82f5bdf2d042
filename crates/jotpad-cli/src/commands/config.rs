use std::path::{Path, PathBuf};

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, data_dir: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_config_show(data_dir),
        ConfigCommands::Set { notes_dir, editor } => run_config_set(notes_dir, editor),
    }
}

fn run_config_show(data_dir: &Path) -> Result<(), CliError> {
    let config = CliConfig::load().map_err(CliError::Config)?;
    println!("config:   {}", default_config_path().display());
    println!("data_dir: {}", data_dir.display());
    println!(
        "editor:   {}",
        config.editor().unwrap_or_else(crate::commands::common::preferred_editor)
    );
    Ok(())
}

fn run_config_set(notes_dir: Option<PathBuf>, editor: Option<String>) -> Result<(), CliError> {
    let mut config = CliConfig::load().map_err(CliError::Config)?;
    if notes_dir.is_none() && editor.is_none() {
        return Err(CliError::Config(
            "Nothing to set; pass --notes-dir and/or --editor".to_string(),
        ));
    }

    if let Some(notes_dir) = notes_dir {
        config.data_dir = Some(notes_dir);
    }
    if let Some(editor) = editor {
        config.editor = Some(editor);
    }

    let path = config.save().map_err(CliError::Config)?;
    tracing::info!("Saved configuration to {}", path.display());
    println!("{}", path.display());
    Ok(())
}
