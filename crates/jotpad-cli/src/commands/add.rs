use std::path::Path;

use jotpad_core::NotePatch;

use crate::commands::common::{open_store, resolve_note_content, resolve_optional_content};
use crate::error::CliError;

pub fn run_add(
    content_parts: &[String],
    title: Option<&str>,
    editor: Option<&str>,
    data_dir: &Path,
) -> Result<(), CliError> {
    // A titled note may start out empty; an untitled one needs content.
    let content = match title {
        Some(_) => resolve_optional_content(content_parts)?,
        None => Some(resolve_note_content(content_parts, editor)?),
    };

    let mut patch = NotePatch::default();
    if let Some(title) = title {
        patch = patch.with_title(title.trim());
    }
    if let Some(content) = content {
        patch = patch.with_content(content);
    }

    let mut store = open_store(data_dir);
    let id = store.create();
    if !patch.is_empty() {
        store.update(&id, patch);
    }

    println!("{id}");
    Ok(())
}
