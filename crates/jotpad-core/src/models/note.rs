//! Note model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Title shown for notes whose title is blank.
pub const UNTITLED: &str = "Untitled";

/// A unique identifier for a note, using UUID v4 (random)
///
/// The string form is the canonical lowercase hyphenated layout, with the
/// RFC 4122 version and variant bits fixed. Persisted ids keep this shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID from the OS random source
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Free-form title, may be empty
    #[serde(default)]
    pub title: String,
    /// Markdown content, may be empty
    #[serde(default)]
    pub content: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Note {
    /// Create a new note stamped with the current wall clock
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_timestamp(title, content, crate::util::unix_timestamp_millis_now())
    }

    /// Create a new note with both timestamps set to `timestamp_ms`
    #[must_use]
    pub fn with_timestamp(
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: content.into(),
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }

    /// Title for display, falling back to "Untitled" when blank
    #[must_use]
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            UNTITLED
        } else {
            title
        }
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `lowered_query` must already be lowercased.
    #[must_use]
    pub fn matches(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
            || self.content.to_lowercase().contains(lowered_query)
    }
}

/// Partial update for a note. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Build a patch from loosely typed JSON.
    ///
    /// Only string-valued `title` and `content` fields are taken; anything
    /// else (missing keys, numbers, nulls, non-object input) is skipped field
    /// by field rather than rejecting the whole patch.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            title: field("title"),
            content: field("content"),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the provided fields to `note`. Timestamps are the caller's job.
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
    }
}
