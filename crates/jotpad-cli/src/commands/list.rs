use std::path::Path;

use jotpad_core::Note;

use crate::commands::common::{format_note_lines, note_to_list_item, open_store, NoteListItem};
use crate::error::CliError;

pub fn run_list(
    query: Option<&str>,
    limit: usize,
    as_json: bool,
    data_dir: &Path,
) -> Result<(), CliError> {
    let store = open_store(data_dir);
    let query = query.map(str::trim).filter(|query| !query.is_empty());
    let mut notes = store.list(query).items;
    notes.truncate(limit);

    print_notes(&notes, as_json)
}

pub fn print_notes(notes: &[Note], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes found");
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }

    Ok(())
}
