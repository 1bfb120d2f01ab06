//! Error types for the content core.

use thiserror::Error;

/// Errors produced by the content core and its storage layer.
#[derive(Debug, Error)]
pub enum Error {
    /// No unique slug could be found within the retry budget.
    ///
    /// Five consecutive collisions on a random 6-character suffix indicate
    /// a systemic problem (exhausted namespace, broken randomness) and must
    /// surface to the caller instead of persisting a colliding slug.
    #[error("could not find a free slug for base {base:?} after {attempts} attempts")]
    SlugExhausted { base: String, attempts: u32 },

    /// Insert rejected because the slug is already present in the store.
    #[error("slug already taken: {0}")]
    SlugTaken(String),

    /// Lookup by slug found nothing.
    #[error("no submission with slug {0:?}")]
    NotFound(String),

    /// A section name outside the canonical set was used.
    #[error("unknown section {0:?}")]
    UnknownSection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
