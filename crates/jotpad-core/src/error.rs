//! Error types for jotpad-core

use thiserror::Error;

/// Result type alias using jotpad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotpad-core operations
///
/// Store operations never return these. They surface only from the fallible
/// storage helpers, which the `NoteStorage` adapters absorb and log.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
