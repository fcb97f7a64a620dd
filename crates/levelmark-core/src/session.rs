//! Placement assessment session: response recording, navigation, and the
//! completion state machine.
//!
//! A session moves `NotStarted → InProgress → Completed`. Navigation never
//! discards recorded answers; finishing with unanswered questions present
//! requires an explicit confirmation step, and declining leaves the session
//! untouched. The only way back to `NotStarted` is a reset (retake) with a
//! freshly selected question set.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Level, Question};
use crate::score::{self, ScoreBreakdown, ASSESSMENT_ABILITIES};

/// Lifecycle phase of a test session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

/// Result of the completion step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    /// The assigned CEFR level.
    pub level: Level,
    /// Overall and per-ability percentages.
    pub breakdown: ScoreBreakdown,
    /// The combined score the level was derived from.
    pub final_score: f64,
}

/// What a finish attempt produced.
#[derive(Debug, Clone)]
pub enum FinishOutcome {
    /// All questions were answered; the session completed.
    Completed(AssessmentOutcome),
    /// Unanswered questions remain; the caller must confirm via
    /// [`AssessmentSession::finish_confirmed`] or abandon the attempt.
    ConfirmationRequired { unanswered: usize },
}

/// A single placement test run over a selected question set.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    questions: Vec<Question>,
    responses: Vec<Option<usize>>,
    current: usize,
    phase: Phase,
    outcome: Option<AssessmentOutcome>,
}

impl AssessmentSession {
    /// Create a session over a non-empty selected question set.
    pub fn new(questions: Vec<Question>) -> Result<Self, CoreError> {
        if questions.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        let responses = vec![None; questions.len()];
        Ok(Self {
            questions,
            responses,
            current: 0,
            phase: Phase::NotStarted,
            outcome: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of questions in the selected set.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Index of the question currently displayed.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Transition to `InProgress` and return the first question. Calling
    /// again while in progress just returns the current question.
    pub fn begin(&mut self) -> Result<&Question, CoreError> {
        match self.phase {
            Phase::Completed => Err(CoreError::AlreadyCompleted),
            Phase::NotStarted => {
                self.phase = Phase::InProgress;
                Ok(&self.questions[self.current])
            }
            Phase::InProgress => Ok(&self.questions[self.current]),
        }
    }

    /// The question currently displayed.
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Record (or overwrite) the choice for the current question.
    pub fn record(&mut self, choice: usize) -> Result<(), CoreError> {
        if self.phase != Phase::InProgress {
            return Err(CoreError::NotInProgress);
        }
        let question = &self.questions[self.current];
        if choice >= question.options.len() {
            return Err(CoreError::ChoiceOutOfRange {
                index: self.current,
                choice,
            });
        }
        self.responses[self.current] = Some(choice);
        Ok(())
    }

    /// The stored choice for question `index`, if any.
    pub fn response_at(&self, index: usize) -> Option<usize> {
        self.responses.get(index).copied().flatten()
    }

    /// Move to the next question, returning it, or `None` at the end.
    pub fn advance(&mut self) -> Option<&Question> {
        if self.phase != Phase::InProgress || self.current + 1 >= self.questions.len() {
            return None;
        }
        self.current += 1;
        Some(&self.questions[self.current])
    }

    /// Move to the previous question, returning it, or `None` at the start.
    pub fn back(&mut self) -> Option<&Question> {
        if self.phase != Phase::InProgress || self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(&self.questions[self.current])
    }

    /// Whether the current question is the last one.
    pub fn at_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// Count of questions without a recorded response.
    pub fn unanswered(&self) -> usize {
        self.responses.iter().filter(|r| r.is_none()).count()
    }

    /// Attempt to finish. With gaps present this changes nothing and asks
    /// the caller to confirm.
    pub fn finish(&mut self) -> Result<FinishOutcome, CoreError> {
        if self.phase != Phase::InProgress {
            return Err(CoreError::NotInProgress);
        }
        let unanswered = self.unanswered();
        if unanswered > 0 {
            return Ok(FinishOutcome::ConfirmationRequired { unanswered });
        }
        Ok(FinishOutcome::Completed(self.complete()))
    }

    /// Finish despite unanswered questions. Call only after the user
    /// confirmed.
    pub fn finish_confirmed(&mut self) -> Result<AssessmentOutcome, CoreError> {
        if self.phase != Phase::InProgress {
            return Err(CoreError::NotInProgress);
        }
        Ok(self.complete())
    }

    /// The completion outcome, once the session finished.
    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        self.outcome.as_ref()
    }

    /// Stored responses, parallel to the question set.
    pub fn responses(&self) -> &[Option<usize>] {
        &self.responses
    }

    /// Retake: discard all responses and restart over a freshly selected
    /// question set.
    pub fn reset(&mut self, questions: Vec<Question>) -> Result<(), CoreError> {
        *self = Self::new(questions)?;
        Ok(())
    }

    fn complete(&mut self) -> AssessmentOutcome {
        let breakdown =
            score::score_responses(&self.questions, &self.responses, &ASSESSMENT_ABILITIES);
        let final_score = score::final_score(&breakdown);
        let outcome = AssessmentOutcome {
            level: score::determine_level(final_score),
            breakdown,
            final_score,
        };
        self.phase = Phase::Completed;
        self.outcome = Some(outcome.clone());
        outcome
    }
}
