//! Core error types.
//!
//! Defined here so front-ends can classify failures (bad label vs. bad
//! index vs. wrong phase) without string matching.

use thiserror::Error;

/// Errors produced by the placement and quiz session machinery.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A level label outside A1–C2 was supplied.
    #[error("unknown CEFR level: {0}")]
    UnknownLevel(String),

    /// An ability tag outside the known set was supplied.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A question index outside the selected set.
    #[error("no question at index {0}")]
    QuestionOutOfRange(usize),

    /// An option index outside the question's option list.
    #[error("question {index} has no option {choice}")]
    ChoiceOutOfRange { index: usize, choice: usize },

    /// A second answer to a question that already took one.
    #[error("question {0} was already answered")]
    AlreadyAnswered(usize),

    /// An operation that requires an in-progress session.
    #[error("session is not in progress")]
    NotInProgress,

    /// An operation on a session that already completed.
    #[error("session already completed")]
    AlreadyCompleted,

    /// A session started with no questions to ask.
    #[error("no questions selected")]
    EmptySelection,
}
