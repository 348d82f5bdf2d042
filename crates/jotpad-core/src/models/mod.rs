//! Data models for Jotpad

mod note;

pub use note::{Note, NoteId, NotePatch, UNTITLED};
