//! Study recommendations derived from assessment and quiz outcomes.
//!
//! Recommendations are plain strings the front-end renders as a list. The
//! assessment variant leads with level-appropriate study advice and appends
//! an ability remark when one dimension lags; the quiz variant leads with a
//! score-band message and appends per-ability and pacing tips.

use crate::model::{Ability, Level};
use crate::quiz::QuizOutcome;
use crate::session::AssessmentOutcome;

/// Maximum number of recommendations returned for an assessment.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Ability percentage below which a targeted remark is added.
const WEAK_ABILITY_THRESHOLD: u8 = 70;

/// Quiz ability percentage below which a practice tip is added.
const QUIZ_TIP_THRESHOLD: u8 = 60;

/// Mean seconds per answer above which a pacing tip is added.
const SLOW_ANSWER_SECS: f64 = 60.0;

/// Level-appropriate study advice, three items per level.
fn level_advice(level: Level) -> [&'static str; 3] {
    match level {
        Level::A1 => [
            "Build a core vocabulary of everyday words with daily flashcard practice",
            "Learn basic sentence patterns: greetings, introductions, simple questions",
            "Listen to slow, clearly spoken dialogues a few minutes every day",
        ],
        Level::A2 => [
            "Expand vocabulary around routine topics: shopping, travel, work",
            "Practice the past and future tenses in short written exchanges",
            "Read short graded texts and retell them in your own words",
        ],
        Level::B1 => [
            "Read short articles on familiar topics and summarize the main points",
            "Keep a journal to practice connecting sentences into paragraphs",
            "Practice expressing opinions and giving simple reasons in conversation",
        ],
        Level::B2 => [
            "Read opinion pieces and note how arguments are structured",
            "Practice discussing abstract topics and defending a viewpoint",
            "Study collocations and phrasal verbs in context rather than in isolation",
        ],
        Level::C1 => [
            "Read long-form journalism and literary prose across varied registers",
            "Write structured essays and seek feedback on cohesion and tone",
            "Practice following fast, idiomatic speech without subtitles",
        ],
        Level::C2 => [
            "Engage with specialized and academic material in your fields of interest",
            "Refine stylistic range: irony, understatement, register shifts",
            "Mentor others or present in the language to consolidate mastery",
        ],
    }
}

/// A targeted remark for the weakest ability dimension.
fn ability_remark(ability: Ability) -> &'static str {
    match ability {
        Ability::Vocabulary => {
            "Your vocabulary lags behind: add spaced-repetition word study to your routine"
        }
        Ability::Grammar => {
            "Grammar is your weakest area: review the structures you missed and drill them"
        }
        Ability::Comprehension => {
            "Comprehension needs work: read slightly below your level to build fluency first"
        }
        Ability::Reasoning => {
            "Reasoning questions tripped you up: practice inferring meaning from context"
        }
        Ability::Inference => {
            "Work on inference: ask what a text implies, not only what it states"
        }
        Ability::Analysis => {
            "Work on analysis: compare viewpoints and identify the author's intent"
        }
    }
}

/// Build study recommendations from a placement assessment outcome: three
/// level-specific items plus a remark for the weakest ability when it scores
/// below 70, capped at [`MAX_RECOMMENDATIONS`].
pub fn for_assessment(outcome: &AssessmentOutcome) -> Vec<String> {
    let mut items: Vec<String> = level_advice(outcome.level)
        .iter()
        .map(|s| s.to_string())
        .collect();

    if let Some((ability, pct)) = outcome.breakdown.abilities.weakest() {
        if pct < WEAK_ABILITY_THRESHOLD {
            items.push(ability_remark(ability).to_string());
        }
    }

    items.truncate(MAX_RECOMMENDATIONS);
    items
}

/// Build feedback from a quiz outcome: a score-band message, a practice tip
/// for every ability under 60, and a pacing tip when the mean answer time
/// exceeds a minute.
pub fn for_quiz(outcome: &QuizOutcome) -> Vec<String> {
    let mut items = Vec::new();

    let overall = outcome.breakdown.overall;
    items.push(
        if overall >= 90 {
            "Outstanding result. You are ready for material above your current level"
        } else if overall >= 70 {
            "Solid performance. Keep practicing at this level to consolidate it"
        } else if overall >= 50 {
            "A reasonable attempt. Review the explanations for the questions you missed"
        } else {
            "This material was challenging. Consider practicing at a lower level first"
        }
        .to_string(),
    );

    for (ability, pct) in outcome.breakdown.abilities.iter() {
        if pct < QUIZ_TIP_THRESHOLD {
            items.push(format!(
                "Practice {ability} questions: you scored {pct}% in that area"
            ));
        }
    }

    if outcome.mean_answer_secs > SLOW_ANSWER_SECS {
        items.push(
            "You averaged over a minute per question: timed reading drills can improve your pace"
                .to_string(),
        );
    }

    items
}
