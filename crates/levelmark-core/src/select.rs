//! Question selection for the placement assessment and the quiz.
//!
//! Sampling is without replacement within a level (shuffle the level pool,
//! truncate to the quota), followed by a global shuffle and truncation. A
//! bank too small for the target total yields a shorter set — no padding,
//! no error.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Level, Question, QuestionBank, ALL_LEVELS};

/// Number of questions in a placement assessment session.
pub const ASSESSMENT_TOTAL: usize = 15;

/// Number of questions in a quiz session.
pub const QUIZ_TOTAL: usize = 10;

/// Per-level quota for the placement assessment: the two lowest levels
/// contribute three questions each, every other level two.
fn assessment_quota(level: Level) -> usize {
    match level {
        Level::A1 | Level::A2 => 3,
        _ => 2,
    }
}

/// Draw a placement assessment set: quota per level, global shuffle,
/// truncate to [`ASSESSMENT_TOTAL`].
pub fn select_assessment<R: Rng>(bank: &QuestionBank, rng: &mut R) -> Vec<Question> {
    let mut selected = Vec::new();
    for level in ALL_LEVELS {
        selected.extend(draw(bank.questions_for(level), assessment_quota(level), rng));
    }
    selected.shuffle(rng);
    selected.truncate(ASSESSMENT_TOTAL);
    selected
}

/// Draw a quiz set centered on `level`: six questions from the center level
/// and two from each in-range neighbor, shuffled and truncated to
/// [`QUIZ_TOTAL`].
pub fn select_quiz<R: Rng>(bank: &QuestionBank, level: Level, rng: &mut R) -> Vec<Question> {
    let mut selected = Vec::new();
    for candidate in [level.prev(), Some(level), level.next()].into_iter().flatten() {
        let quota = if candidate == level { 6 } else { 2 };
        selected.extend(draw(bank.questions_for(candidate), quota, rng));
    }
    selected.shuffle(rng);
    selected.truncate(QUIZ_TOTAL);
    selected
}

fn draw<R: Rng>(pool: &[Question], quota: usize, rng: &mut R) -> Vec<Question> {
    let mut shuffled: Vec<Question> = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(quota);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ability, QuestionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::collections::HashSet;

    fn bank_with(counts: &[(Level, usize)]) -> QuestionBank {
        let mut levels: BTreeMap<Level, Vec<Question>> = BTreeMap::new();
        for &(level, count) in counts {
            let questions = (0..count)
                .map(|i| Question {
                    id: format!("{level}-{i}"),
                    kind: QuestionKind::Vocabulary,
                    level,
                    context: None,
                    prompt: format!("{level} question {i}"),
                    options: vec!["a".into(), "b".into()],
                    correct: 0,
                    ability: Ability::Vocabulary,
                    explanation: String::new(),
                })
                .collect();
            levels.insert(level, questions);
        }
        QuestionBank {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            levels,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn assessment_respects_total_and_uniqueness() {
        let bank = bank_with(&[
            (Level::A1, 10),
            (Level::A2, 10),
            (Level::B1, 10),
            (Level::B2, 10),
            (Level::C1, 10),
            (Level::C2, 10),
        ]);
        let selected = select_assessment(&bank, &mut rng());
        // Quotas sum to 14, below the 15 cap.
        assert_eq!(selected.len(), 14);
        let ids: HashSet<_> = selected.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), selected.len(), "duplicate question selected");
    }

    #[test]
    fn assessment_shortfall_yields_shorter_set() {
        // 3+3+2+2+2+2 = 14 available, quotas consume all of them.
        let bank = bank_with(&[
            (Level::A1, 3),
            (Level::A2, 3),
            (Level::B1, 2),
            (Level::B2, 2),
            (Level::C1, 2),
            (Level::C2, 2),
        ]);
        let selected = select_assessment(&bank, &mut rng());
        assert_eq!(selected.len(), 14);
    }

    #[test]
    fn assessment_quota_favors_low_levels() {
        let bank = bank_with(&[
            (Level::A1, 10),
            (Level::A2, 10),
            (Level::B1, 10),
        ]);
        let selected = select_assessment(&bank, &mut rng());
        let a1 = selected.iter().filter(|q| q.level == Level::A1).count();
        let b1 = selected.iter().filter(|q| q.level == Level::B1).count();
        assert_eq!(a1, 3);
        assert_eq!(b1, 2);
    }

    #[test]
    fn quiz_centers_on_user_level() {
        let bank = bank_with(&[
            (Level::A2, 10),
            (Level::B1, 10),
            (Level::B2, 10),
        ]);
        let selected = select_quiz(&bank, Level::B1, &mut rng());
        assert_eq!(selected.len(), QUIZ_TOTAL);
        let center = selected.iter().filter(|q| q.level == Level::B1).count();
        assert_eq!(center, 6);
        let below = selected.iter().filter(|q| q.level == Level::A2).count();
        let above = selected.iter().filter(|q| q.level == Level::B2).count();
        assert_eq!(below, 2);
        assert_eq!(above, 2);
    }

    #[test]
    fn quiz_at_a1_skips_missing_lower_neighbor() {
        let bank = bank_with(&[(Level::A1, 10), (Level::A2, 10)]);
        let selected = select_quiz(&bank, Level::A1, &mut rng());
        // 6 from A1, 2 from A2, no level below A1.
        assert_eq!(selected.len(), 8);
        assert!(selected.iter().all(|q| q.level <= Level::A2));
    }

    #[test]
    fn quiz_never_exceeds_total() {
        let bank = bank_with(&[
            (Level::B1, 20),
            (Level::B2, 20),
            (Level::C1, 20),
        ]);
        let selected = select_quiz(&bank, Level::B2, &mut rng());
        assert!(selected.len() <= QUIZ_TOTAL);
        let ids: HashSet<_> = selected.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), selected.len());
    }

    #[test]
    fn empty_bank_selects_nothing() {
        let bank = bank_with(&[]);
        assert!(select_assessment(&bank, &mut rng()).is_empty());
        assert!(select_quiz(&bank, Level::B2, &mut rng()).is_empty());
    }
}
