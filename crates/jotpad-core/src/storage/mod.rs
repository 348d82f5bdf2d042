//! Persistence adapters for the note store.
//!
//! The store only ever talks to the narrow [`NoteStorage`] contract, so a
//! different backing medium (including a remote one) can be swapped in
//! without touching store logic.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use serde_json::Value;

use crate::error::Result;
use crate::models::Note;

/// Fixed key the note collection is persisted under.
pub const STORAGE_KEY: &str = "notes.v1";

/// Best-effort persistence boundary used by [`crate::NoteStore`].
///
/// Implementations must never panic or surface errors to the store:
/// - `load` returns an empty collection when data is missing or corrupt
/// - `save` swallows write failures (logging them is fine)
pub trait NoteStorage {
    /// Load the persisted collection in stored order.
    fn load(&self) -> Vec<Note>;

    /// Persist the full collection, replacing whatever was stored before.
    fn save(&self, notes: &[Note]);
}

impl<S: NoteStorage + ?Sized> NoteStorage for Box<S> {
    fn load(&self) -> Vec<Note> {
        (**self).load()
    }

    fn save(&self, notes: &[Note]) {
        (**self).save(notes);
    }
}

/// Decode a persisted payload.
///
/// Only malformed JSON is an error. A well-formed value that is not an
/// array decodes as an empty collection, and array elements that are not
/// valid notes are skipped so one bad record never costs the others.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>> {
    let Value::Array(elements) = serde_json::from_str::<Value>(raw)? else {
        return Ok(Vec::new());
    };

    let notes = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value::<Note>(element) {
            Ok(note) => Some(note),
            Err(error) => {
                tracing::warn!("Skipping malformed stored note at index {}: {}", index, error);
                None
            }
        })
        .collect();
    Ok(notes)
}

/// Encode the collection into the persisted JSON array layout.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}
