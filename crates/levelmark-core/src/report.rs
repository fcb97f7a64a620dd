//! Result reports with JSON persistence.
//!
//! A report is the durable record of a completed run: enough to re-render
//! the result screen and to review every question afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Level, Question};
use crate::quiz::QuizOutcome;
use crate::score::ScoreBreakdown;
use crate::session::AssessmentOutcome;

/// Summary of the bank a run drew from (without the full question pool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// Per-question review line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub prompt: String,
    /// The option the learner picked, if any.
    pub chosen: Option<usize>,
    /// Index of the correct option.
    pub correct: usize,
    pub was_correct: bool,
    #[serde(default)]
    pub explanation: String,
}

/// Build review lines for a graded question set.
pub fn reviews(questions: &[Question], responses: &[Option<usize>]) -> Vec<QuestionReview> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let chosen = responses.get(i).copied().flatten();
            QuestionReview {
                question_id: q.id.clone(),
                prompt: q.prompt.clone(),
                chosen,
                correct: q.correct,
                was_correct: chosen.is_some_and(|c| q.is_correct(c)),
                explanation: q.explanation.clone(),
            }
        })
        .collect()
}

/// A complete placement assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank the questions came from.
    pub bank: BankSummary,
    /// The assigned CEFR level.
    pub level: Level,
    /// The combined score the level was derived from.
    pub final_score: f64,
    /// Overall and per-ability percentages.
    pub breakdown: ScoreBreakdown,
    /// Study recommendations.
    pub recommendations: Vec<String>,
    /// Per-question review lines.
    pub reviews: Vec<QuestionReview>,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl AssessmentReport {
    /// Assemble a report from a completed run.
    pub fn from_outcome(
        bank: BankSummary,
        outcome: &AssessmentOutcome,
        recommendations: Vec<String>,
        reviews: Vec<QuestionReview>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank,
            level: outcome.level,
            final_score: outcome.final_score,
            breakdown: outcome.breakdown.clone(),
            recommendations,
            reviews,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// A complete quiz report. Quizzes never change the assigned level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub bank: BankSummary,
    /// The level the quiz was centered on.
    pub centered_on: Level,
    pub breakdown: ScoreBreakdown,
    pub mean_answer_secs: f64,
    pub recommendations: Vec<String>,
    pub reviews: Vec<QuestionReview>,
    pub duration_ms: u64,
}

impl QuizReport {
    pub fn from_outcome(
        bank: BankSummary,
        centered_on: Level,
        outcome: &QuizOutcome,
        recommendations: Vec<String>,
        reviews: Vec<QuestionReview>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank,
            centered_on,
            breakdown: outcome.breakdown.clone(),
            mean_answer_secs: outcome.mean_answer_secs,
            recommendations,
            reviews,
            duration_ms,
        }
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse report JSON")
}
