//! In-memory adapter, mainly for tests and embedders without a filesystem.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{decode_notes, encode_notes, NoteStorage};
use crate::models::Note;

/// Keeps the encoded collection in memory.
///
/// Cloning yields another handle to the same slot, so a caller can hand one
/// clone to a store and inspect what was persisted through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemorySlot>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: RefCell<Option<String>>,
    save_count: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with an encoded collection.
    pub fn with_notes(notes: &[Note]) -> Self {
        let storage = Self::default();
        *storage.inner.raw.borrow_mut() = encode_notes(notes).ok();
        storage
    }

    /// Storage holding an arbitrary raw payload (e.g. corrupt data).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.inner.raw.borrow_mut() = Some(raw.into());
        storage
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.inner.save_count.get()
    }

    /// Make subsequent saves fail, as a full or read-only medium would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }
}

impl NoteStorage for MemoryStorage {
    fn load(&self) -> Vec<Note> {
        let raw = self.inner.raw.borrow();
        let Some(raw) = raw.as_deref() else {
            return Vec::new();
        };
        decode_notes(raw).unwrap_or_else(|error| {
            tracing::warn!("Ignoring corrupt in-memory note storage: {}", error);
            Vec::new()
        })
    }

    fn save(&self, notes: &[Note]) {
        if self.inner.fail_writes.get() {
            tracing::warn!("Dropping write of {} notes: storage unavailable", notes.len());
            return;
        }
        match encode_notes(notes) {
            Ok(raw) => {
                *self.inner.raw.borrow_mut() = Some(raw);
                self.inner.save_count.set(self.inner.save_count.get() + 1);
            }
            Err(error) => tracing::warn!("Failed to encode notes: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_slot() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.save(&[Note::new("a", "b")]);

        assert_eq!(observer.save_count(), 1);
        assert_eq!(observer.load().len(), 1);
    }

    #[test]
    fn failing_writes_leave_previous_payload() {
        let storage = MemoryStorage::with_notes(&[Note::new("kept", "")]);
        storage.set_fail_writes(true);

        storage.save(&[]);

        assert_eq!(storage.save_count(), 0);
        assert_eq!(storage.load()[0].title, "kept");
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let storage = MemoryStorage::with_raw("<<<");
        assert!(storage.load().is_empty());
    }
}
