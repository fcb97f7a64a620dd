//! Error types for the learning modules.

use thiserror::Error;

/// Errors produced by the flashcard and reading machinery.
#[derive(Debug, Error)]
pub enum LearnError {
    /// A deck operation with no cards to operate on.
    #[error("the deck has no cards")]
    EmptyDeck,

    /// A filter mode that matches no cards at the current level.
    #[error("no cards match the {0} filter")]
    EmptyFilter(String),
}
