//! Comprehension quiz session with per-answer feedback.
//!
//! Unlike the placement assessment, the quiz is linear: each question takes
//! exactly one answer, feedback (correctness, the right option, explanation)
//! is revealed immediately, and there is no going back. A running difficulty
//! label tracks accuracy over the questions reached so far; it is purely
//! informational and never feeds back into question selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::model::Question;
use crate::score::{self, ScoreBreakdown, QUIZ_ABILITIES};
use crate::session::Phase;

/// Running difficulty label derived from accuracy so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl Difficulty {
    /// Label for an accuracy ratio: above 0.8 hard, above 0.6 medium,
    /// otherwise easy. High accuracy means the learner is ready for harder
    /// material.
    fn from_accuracy(accuracy: f64) -> Self {
        if accuracy > 0.8 {
            Difficulty::Hard
        } else if accuracy > 0.6 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

/// Immediate feedback for a submitted answer.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    /// Whether the submitted choice was correct.
    pub correct: bool,
    /// Index of the correct option.
    pub correct_index: usize,
    /// Explanation text for the question.
    pub explanation: String,
    /// Difficulty label after this answer.
    pub difficulty: Difficulty,
}

/// Result of completing a quiz. Quizzes never change the assigned level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Overall and per-ability percentages.
    pub breakdown: ScoreBreakdown,
    /// Mean seconds per answered question; 0.0 with nothing answered.
    pub mean_answer_secs: f64,
}

/// A single quiz run over a selected question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    responses: Vec<Option<usize>>,
    answer_secs: Vec<Option<f64>>,
    current: usize,
    phase: Phase,
}

impl QuizSession {
    /// Create a session over a non-empty selected question set.
    pub fn new(questions: Vec<Question>) -> Result<Self, CoreError> {
        if questions.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        let n = questions.len();
        Ok(Self {
            questions,
            responses: vec![None; n],
            answer_secs: vec![None; n],
            current: 0,
            phase: Phase::NotStarted,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Transition to `InProgress` and return the first question.
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

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Submit the answer for the current question along with the time it
    /// took. Each question takes exactly one answer.
    pub fn answer(&mut self, choice: usize, elapsed_secs: f64) -> Result<AnswerFeedback, CoreError> {
        if self.phase != Phase::InProgress {
            return Err(CoreError::NotInProgress);
        }
        if self.responses[self.current].is_some() {
            return Err(CoreError::AlreadyAnswered(self.current));
        }
        let question = &self.questions[self.current];
        if choice >= question.options.len() {
            return Err(CoreError::ChoiceOutOfRange {
                index: self.current,
                choice,
            });
        }
        self.responses[self.current] = Some(choice);
        self.answer_secs[self.current] = Some(elapsed_secs);
        Ok(AnswerFeedback {
            correct: question.is_correct(choice),
            correct_index: question.correct,
            explanation: question.explanation.clone(),
            difficulty: self.difficulty(),
        })
    }

    /// Current difficulty label. Accuracy is measured against the questions
    /// reached so far (current position plus one), so an unanswered skip
    /// drags the label down the same way a wrong answer does.
    pub fn difficulty(&self) -> Difficulty {
        let correct = self
            .questions
            .iter()
            .zip(&self.responses)
            .filter(|(q, r)| r.is_some_and(|choice| q.is_correct(choice)))
            .count();
        let reached = self.current + 1;
        Difficulty::from_accuracy(correct as f64 / reached as f64)
    }

    /// Move to the next question, returning it, or `None` at the end.
    pub fn advance(&mut self) -> Option<&Question> {
        if self.phase != Phase::InProgress || self.current + 1 >= self.questions.len() {
            return None;
        }
        self.current += 1;
        Some(&self.questions[self.current])
    }

    /// Whether the current question is the last one.
    pub fn at_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn responses(&self) -> &[Option<usize>] {
        &self.responses
    }

    /// Grade the run. Unanswered questions count as wrong.
    pub fn finish(&mut self) -> Result<QuizOutcome, CoreError> {
        if self.phase != Phase::InProgress {
            return Err(CoreError::NotInProgress);
        }
        let breakdown = score::score_responses(&self.questions, &self.responses, &QUIZ_ABILITIES);
        let times: Vec<f64> = self.answer_secs.iter().copied().flatten().collect();
        let mean_answer_secs = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        };
        self.phase = Phase::Completed;
        Ok(QuizOutcome {
            breakdown,
            mean_answer_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ability, Level, QuestionKind};

    fn question(id: &str, kind: QuestionKind) -> Question {
        Question {
            id: id.into(),
            kind,
            level: Level::B1,
            context: Some("A short passage.".into()),
            prompt: format!("prompt {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct: 0,
            ability: kind.ability(),
            explanation: format!("because {id}"),
        }
    }

    fn session(n: usize) -> QuizSession {
        let questions = (0..n)
            .map(|i| question(&format!("q{i}"), QuestionKind::Comprehension))
            .collect();
        QuizSession::new(questions).unwrap()
    }

    #[test]
    fn feedback_reveals_correct_option_and_explanation() {
        let mut s = session(3);
        s.begin().unwrap();
        let feedback = s.answer(1, 4.0).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_index, 0);
        assert_eq!(feedback.explanation, "because q0");
    }

    #[test]
    fn each_question_takes_one_answer() {
        let mut s = session(2);
        s.begin().unwrap();
        s.answer(0, 1.0).unwrap();
        assert!(matches!(
            s.answer(1, 1.0),
            Err(CoreError::AlreadyAnswered(0))
        ));
        // The first answer stands.
        assert_eq!(s.responses()[0], Some(0));
    }

    #[test]
    fn difficulty_rises_with_accuracy() {
        let mut s = session(5);
        s.begin().unwrap();
        // 1/1 correct: accuracy 1.0, hard.
        let f = s.answer(0, 1.0).unwrap();
        assert_eq!(f.difficulty, Difficulty::Hard);
        s.advance().unwrap();
        // 1/2: 0.5, easy.
        let f = s.answer(1, 1.0).unwrap();
        assert_eq!(f.difficulty, Difficulty::Easy);
        s.advance().unwrap();
        // 2/3: ~0.67, medium.
        let f = s.answer(0, 1.0).unwrap();
        assert_eq!(f.difficulty, Difficulty::Medium);
    }

    #[test]
    fn difficulty_counts_position_not_answers() {
        let mut s = session(4);
        s.begin().unwrap();
        s.answer(0, 1.0).unwrap();
        s.advance().unwrap();
        s.advance().unwrap();
        // One correct answer but three questions reached: 1/3, easy.
        assert_eq!(s.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn outcome_uses_quiz_ability_order() {
        let questions = vec![
            question("q0", QuestionKind::Comprehension),
            question("q1", QuestionKind::Vocabulary),
            question("q2", QuestionKind::Inference),
            question("q3", QuestionKind::CriticalThinking),
        ];
        let mut s = QuizSession::new(questions).unwrap();
        s.begin().unwrap();
        s.answer(0, 2.0).unwrap();
        s.advance().unwrap();
        s.answer(1, 2.0).unwrap();
        s.advance().unwrap();
        s.answer(0, 2.0).unwrap();
        s.advance().unwrap();
        s.answer(0, 2.0).unwrap();
        let outcome = s.finish().unwrap();
        assert_eq!(outcome.breakdown.abilities.get(Ability::Comprehension), Some(100));
        assert_eq!(outcome.breakdown.abilities.get(Ability::Vocabulary), Some(0));
        assert_eq!(outcome.breakdown.abilities.get(Ability::Inference), Some(100));
        // Critical thinking aggregates into analysis.
        assert_eq!(outcome.breakdown.abilities.get(Ability::Analysis), Some(100));
        assert_eq!(outcome.breakdown.overall, 75);
    }

    #[test]
    fn mean_answer_time_over_answered_questions() {
        let mut s = session(3);
        s.begin().unwrap();
        s.answer(0, 2.0).unwrap();
        s.advance().unwrap();
        s.answer(0, 6.0).unwrap();
        // Third question left unanswered.
        s.advance().unwrap();
        let outcome = s.finish().unwrap();
        assert!((outcome.mean_answer_secs - 4.0).abs() < f64::EPSILON);
        assert_eq!(outcome.breakdown.answered, 2);
        assert_eq!(outcome.breakdown.total, 3);
    }

    #[test]
    fn finish_requires_in_progress() {
        let mut s = session(1);
        assert!(matches!(s.finish(), Err(CoreError::NotInProgress)));
        s.begin().unwrap();
        s.answer(0, 1.0).unwrap();
        s.finish().unwrap();
        assert!(matches!(s.finish(), Err(CoreError::NotInProgress)));
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(
            QuizSession::new(vec![]),
            Err(CoreError::EmptySelection)
        ));
    }
}
