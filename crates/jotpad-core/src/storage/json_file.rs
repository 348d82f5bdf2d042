//! File-backed adapter storing the collection as one JSON document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{decode_notes, encode_notes, NoteStorage, STORAGE_KEY};
use crate::error::Result;
use crate::models::Note;

/// Stores notes in `<data_dir>/notes.v1.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Adapter for the fixed storage key inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection, returning an empty list when the file is absent.
    pub fn read_notes(&self) -> Result<Vec<Note>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        decode_notes(&raw)
    }

    /// Atomically replace the stored collection.
    pub fn write_notes(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let serialized = encode_notes(notes)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, serialized)?;
        if let Err(error) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(error.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl NoteStorage for JsonFileStorage {
    fn load(&self) -> Vec<Note> {
        match self.read_notes() {
            Ok(notes) => notes,
            Err(error) => {
                tracing::warn!(
                    "Ignoring unreadable note storage at {}: {}",
                    self.path.display(),
                    error
                );
                Vec::new()
            }
        }
    }

    fn save(&self, notes: &[Note]) {
        if let Err(error) = self.write_notes(notes) {
            tracing::warn!(
                "Failed to persist {} notes to {}: {}",
                notes.len(),
                self.path.display(),
                error
            );
        }
    }
}
