use std::path::Path;

use crate::commands::common::{normalize_note_identifier, open_store, resolve_note};
use crate::error::CliError;

pub fn run_delete(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut store = open_store(data_dir);
    let note = resolve_note(&normalized_id, &store)?;

    store.remove(&note.id);
    println!("{}", note.id);
    Ok(())
}
