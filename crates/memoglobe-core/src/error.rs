//! Error types for MemoGlobe.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using MemoGlobe's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for MemoGlobe operations.
///
/// The in-memory store never produces these for missing entities; it reports
/// absence with `Option`, and the request layer turns that into one of the
/// `*NotFound` variants.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("note not found: {0}")]
    NoteNotFound(Uuid),

    /// Anchor not found
    #[error("anchor not found: {0}")]
    AnchorNotFound(Uuid),

    /// Journey route not found
    #[error("route not found: {0}")]
    RouteNotFound(Uuid),

    /// Daily quest not found
    #[error("quest not found: {0}")]
    QuestNotFound(Uuid),

    /// Invalid input (constraint violation on request parameters)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or malformed credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for every variant that means "the addressed entity does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::NoteNotFound(_)
                | Error::AnchorNotFound(_)
                | Error::RouteNotFound(_)
                | Error::QuestNotFound(_)
        )
    }
}
