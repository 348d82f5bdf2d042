//! Note store: canonical in-memory state, persistence, and change
//! notification.
//!
//! The store is an explicit context object. The application entry point
//! builds one, calls [`NoteStore::initialize`], and hands it out by
//! reference. Every mutation runs to completion in the same order:
//! mutate, persist through the [`NoteStorage`] adapter, notify subscribers.

mod listeners;

use std::cmp::Reverse;
use std::collections::HashSet;
use std::rc::Rc;

use serde::Serialize;

pub use listeners::Subscription;

use crate::models::{Note, NoteId, NotePatch};
use crate::storage::NoteStorage;
use crate::util::unix_timestamp_millis_now;
use listeners::ListenerSet;

/// Title of the note seeded into empty storage.
pub const WELCOME_TITLE: &str = "Welcome to Notes";

/// Markdown body of the note seeded into empty storage.
pub const WELCOME_CONTENT: &str = "# Welcome

This is your first note. It supports Markdown.

- Create notes with `jot add`
- Find notes by title or content with `jot search`
- Preview the rendered Markdown with `jot preview`
- Your notes are saved locally (offline-first)

Enjoy writing!";

/// The welcome note is backdated so a note created right after startup
/// sorts above it.
const WELCOME_BACKDATE_MS: i64 = 1_000;

/// Snapshot of store state handed to listeners and returned by `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Notes sorted by `updated_at`, newest first
    pub items: Vec<Note>,
    /// Currently selected note
    pub selected_id: Option<NoteId>,
}

/// Single source of truth for notes.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    state: StoreState,
    listeners: ListenerSet,
    clock: Box<dyn Fn() -> i64>,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Create an empty store backed by `storage`, stamped by the wall clock.
    ///
    /// Nothing is loaded until [`NoteStore::initialize`] runs.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, unix_timestamp_millis_now)
    }

    /// Create a store with a custom millisecond clock.
    pub fn with_clock(storage: S, clock: impl Fn() -> i64 + 'static) -> Self {
        Self {
            storage,
            state: StoreState::default(),
            listeners: ListenerSet::default(),
            clock: Box::new(clock),
        }
    }

    /// Load notes from storage, seeding the welcome note when there are
    /// none, select the newest note, and notify subscribers once.
    pub fn initialize(&mut self) {
        let mut items = dedupe_by_id(self.storage.load());
        if items.is_empty() {
            items = vec![self.welcome_note()];
            self.storage.save(&items);
            tracing::debug!("Seeded empty note storage with the welcome note");
        }

        self.state.items = items;
        self.sort_items();
        self.state.selected_id = self.state.items.first().map(|note| note.id);
        tracing::debug!("Note store initialized with {} notes", self.state.items.len());
        self.notify();
    }

    /// Register a listener called with the full state after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&StoreState) + 'static) -> Subscription {
        self.listeners.add(Rc::new(listener))
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Create an empty note at the top of the list and select it.
    pub fn create(&mut self) -> NoteId {
        let note = Note::with_timestamp("", "", self.now());
        let id = note.id;

        self.state.items.insert(0, note);
        // Stable: equal timestamps keep the new note in front.
        self.sort_items();
        self.state.selected_id = Some(id);
        tracing::debug!("Created note {}", id);

        self.persist();
        self.notify();
        id
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.state.items.iter().find(|note| note.id == *id)
    }

    /// Apply `patch` to the note with `id`.
    ///
    /// Returns `false` without persisting or notifying when no such note
    /// exists.
    pub fn update(&mut self, id: &NoteId, patch: NotePatch) -> bool {
        let now = self.now();
        let Some(note) = self.state.items.iter_mut().find(|note| note.id == *id) else {
            tracing::debug!("Ignoring update for unknown note {}", id);
            return false;
        };

        patch.apply_to(note);
        note.updated_at = now.max(note.created_at);
        self.sort_items();
        tracing::debug!("Updated note {}", id);

        self.persist();
        self.notify();
        true
    }

    /// Delete the note with `id`. Returns whether anything was removed.
    ///
    /// Removing the selected note moves the selection to the newest
    /// remaining note, or clears it.
    pub fn remove(&mut self, id: &NoteId) -> bool {
        let Some(index) = self.state.items.iter().position(|note| note.id == *id) else {
            return false;
        };

        self.state.items.remove(index);
        if self.state.selected_id.as_ref() == Some(id) {
            self.state.selected_id = self.state.items.first().map(|note| note.id);
        }
        tracing::debug!("Removed note {}", id);

        self.persist();
        self.notify();
        true
    }

    /// Change the selection. Notifies only when the value changes.
    ///
    /// The id is not checked against the collection: callers pass a known
    /// id or `None`.
    pub fn select(&mut self, id: Option<NoteId>) {
        if self.state.selected_id != id {
            self.state.selected_id = id;
            self.notify();
        }
    }

    /// The selected note, if the selection refers to one.
    pub fn current(&self) -> Option<&Note> {
        self.state.selected_id.as_ref().and_then(|id| self.get(id))
    }

    /// Snapshot of the collection, optionally filtered.
    ///
    /// A non-empty query keeps notes whose title or content contains it,
    /// ignoring case, in stored order.
    pub fn list(&self, query: Option<&str>) -> StoreState {
        let items = match query.filter(|query| !query.is_empty()) {
            None => self.state.items.clone(),
            Some(query) => {
                let lowered = query.to_lowercase();
                self.state
                    .items
                    .iter()
                    .filter(|note| note.matches(&lowered))
                    .cloned()
                    .collect()
            }
        };

        StoreState {
            items,
            selected_id: self.state.selected_id,
        }
    }

    /// Borrow the live state.
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    fn welcome_note(&self) -> Note {
        Note::with_timestamp(
            WELCOME_TITLE,
            WELCOME_CONTENT,
            self.now() - WELCOME_BACKDATE_MS,
        )
    }

    fn sort_items(&mut self) {
        self.state
            .items
            .sort_by_key(|note| Reverse(note.updated_at));
    }

    fn persist(&self) {
        self.storage.save(&self.state.items);
    }

    fn notify(&self) {
        self.listeners.notify(&self.state);
    }
}

fn dedupe_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::with_capacity(notes.len());
    let before = notes.len();
    let unique: Vec<Note> = notes.into_iter().filter(|note| seen.insert(note.id)).collect();
    if unique.len() != before {
        tracing::warn!(
            "Dropped {} stored notes with duplicate ids",
            before - unique.len()
        );
    }
    unique
}
