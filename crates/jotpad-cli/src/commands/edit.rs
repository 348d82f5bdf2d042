use std::path::Path;

use jotpad_core::NotePatch;

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_note_identifier, open_store, resolve_note,
};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    title: Option<&str>,
    editor: Option<&str>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut store = open_store(data_dir);
    let note = resolve_note(&normalized_id, &store)?;

    let patch = if let Some(title) = title {
        NotePatch::title(title.trim())
    } else {
        let Some(edited_content) = capture_editor_input_with_initial(&note.content, editor)?
        else {
            return Err(CliError::EmptyEditedContent);
        };
        NotePatch::content(edited_content)
    };

    let unchanged = patch.title.as_ref().is_none_or(|title| *title == note.title)
        && patch
            .content
            .as_ref()
            .is_none_or(|content| *content == note.content);
    if !unchanged {
        store.update(&note.id, patch);
    }

    println!("{}", note.id);
    Ok(())
}
