//! Ability aggregation and CEFR level determination.
//!
//! Scores are integer percentages. The overall score counts unanswered
//! questions as wrong (denominator is the full selected set), matching the
//! placement test's grading.

use serde::{Deserialize, Serialize};

use crate::model::{Ability, Level, Question};

/// Ability dimensions tallied by the placement assessment, in the fixed
/// order used for reporting and weakest-ability tie-breaks.
pub const ASSESSMENT_ABILITIES: [Ability; 4] = [
    Ability::Vocabulary,
    Ability::Grammar,
    Ability::Comprehension,
    Ability::Reasoning,
];

/// Ability dimensions tallied by the comprehension quiz, in fixed order.
pub const QUIZ_ABILITIES: [Ability; 4] = [
    Ability::Comprehension,
    Ability::Vocabulary,
    Ability::Inference,
    Ability::Analysis,
];

/// Per-ability percentages in a fixed iteration order.
///
/// The order is the declaration order of the pipeline's ability set, so the
/// "first minimum wins" tie-break in weakest-ability lookups is
/// deterministic and documented rather than incidental.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    entries: Vec<(Ability, u8)>,
}

impl AbilityScores {
    /// Build scores in the given order from (correct, total) tallies.
    /// An ability with a zero total scores exactly 0, never NaN.
    pub fn from_tallies(order: &[Ability], tallies: &[(Ability, u32, u32)]) -> Self {
        let entries = order
            .iter()
            .map(|&ability| {
                let (correct, total) = tallies
                    .iter()
                    .find(|(a, _, _)| *a == ability)
                    .map(|&(_, c, t)| (c, t))
                    .unwrap_or((0, 0));
                (ability, percentage(correct, total))
            })
            .collect();
        Self { entries }
    }

    /// The percentage for `ability`, if tracked.
    pub fn get(&self, ability: Ability) -> Option<u8> {
        self.entries
            .iter()
            .find(|(a, _)| *a == ability)
            .map(|&(_, pct)| pct)
    }

    /// Iterate `(ability, percentage)` pairs in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, u8)> + '_ {
        self.entries.iter().copied()
    }

    /// Mean of all tracked percentages; 0.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.entries.iter().map(|&(_, pct)| pct as u32).sum();
        sum as f64 / self.entries.len() as f64
    }

    /// The lowest-scoring ability; ties resolve to the first in iteration
    /// order.
    pub fn weakest(&self) -> Option<(Ability, u8)> {
        let mut weakest: Option<(Ability, u8)> = None;
        for &(ability, pct) in &self.entries {
            match weakest {
                Some((_, best)) if pct >= best => {}
                _ => weakest = Some((ability, pct)),
            }
        }
        weakest
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Outcome of grading a selected question set against its responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// round(correct / selected-set size × 100).
    pub overall: u8,
    /// Number of correctly answered questions.
    pub correct: usize,
    /// Number of questions with a recorded response.
    pub answered: usize,
    /// Size of the selected question set.
    pub total: usize,
    /// Per-ability percentages.
    pub abilities: AbilityScores,
}

/// Grade `responses` against `questions`, tallying the abilities named in
/// `order`. Questions whose ability is outside `order` still count toward
/// the overall score.
pub fn score_responses(
    questions: &[Question],
    responses: &[Option<usize>],
    order: &[Ability],
) -> ScoreBreakdown {
    let mut tallies: Vec<(Ability, u32, u32)> =
        order.iter().map(|&a| (a, 0, 0)).collect();
    let mut correct = 0usize;
    let mut answered = 0usize;

    for (i, question) in questions.iter().enumerate() {
        let response = responses.get(i).copied().flatten();
        if response.is_some() {
            answered += 1;
        }
        let is_correct = response.is_some_and(|choice| question.is_correct(choice));
        if is_correct {
            correct += 1;
        }
        if let Some(tally) = tallies.iter_mut().find(|(a, _, _)| *a == question.ability) {
            if is_correct {
                tally.1 += 1;
            }
            tally.2 += 1;
        }
    }

    ScoreBreakdown {
        overall: percentage(correct as u32, questions.len() as u32),
        correct,
        answered,
        total: questions.len(),
        abilities: AbilityScores::from_tallies(order, &tallies),
    }
}

/// The combined placement score: mean of the overall percentage and the
/// average ability percentage.
pub fn final_score(breakdown: &ScoreBreakdown) -> f64 {
    (breakdown.overall as f64 + breakdown.abilities.mean()) / 2.0
}

/// Map a final score onto a CEFR level. Thresholds are evaluated from
/// highest to lowest and are inclusive at the boundary.
pub fn determine_level(final_score: f64) -> Level {
    if final_score >= 90.0 {
        Level::C2
    } else if final_score >= 80.0 {
        Level::C1
    } else if final_score >= 70.0 {
        Level::B2
    } else if final_score >= 60.0 {
        Level::B1
    } else if final_score >= 50.0 {
        Level::A2
    } else {
        Level::A1
    }
}

fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u8
}
