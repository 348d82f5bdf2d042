//! jotpad-core - Core library for Jotpad
//!
//! This crate contains the note model, the note store with its subscription
//! model, the pluggable storage adapters, and the Markdown preview renderer
//! used by every Jotpad front end.

pub mod error;
pub mod export;
pub mod markdown;
pub mod models;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId, NotePatch};
pub use storage::{JsonFileStorage, MemoryStorage, NoteStorage};
pub use store::{NoteStore, StoreState, Subscription};
