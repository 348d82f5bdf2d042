use std::path::Path;

use crate::commands::common::{
    normalize_note_identifier, open_store, render_preview_document, resolve_note, write_output,
};
use crate::error::CliError;

pub fn run_preview(id: &str, output_path: Option<&Path>, data_dir: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let store = open_store(data_dir);
    let note = resolve_note(&normalized_id, &store)?;

    write_output(&render_preview_document(&note), output_path)
}
