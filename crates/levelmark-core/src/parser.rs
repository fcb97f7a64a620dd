//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Level, Question, QuestionBank, QuestionKind};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default = "default_kind")]
    kind: QuestionKind,
    level: String,
    #[serde(default)]
    context: Option<String>,
    prompt: String,
    options: Vec<String>,
    correct: usize,
    #[serde(default)]
    explanation: String,
}

fn default_kind() -> QuestionKind {
    QuestionKind::Vocabulary
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut levels: BTreeMap<Level, Vec<Question>> = BTreeMap::new();
    for q in parsed.questions {
        let level: Level = q
            .level
            .parse()
            .with_context(|| format!("question {}: bad level {:?}", q.id, q.level))?;
        let ability = q.kind.ability();
        levels.entry(level).or_default().push(Question {
            id: q.id,
            kind: q.kind,
            level,
            context: q.context,
            prompt: q.prompt,
            options: q.options,
            correct: q.correct,
            ability,
            explanation: q.explanation,
        });
    }

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        levels,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for q in bank.levels.values().flatten() {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    // Check the correct index points at an existing option
    for q in bank.levels.values().flatten() {
        if q.correct >= q.options.len() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!(
                    "correct index {} out of range for {} options",
                    q.correct,
                    q.options.len()
                ),
            });
        }
    }

    // Check option counts
    for q in bank.levels.values().flatten() {
        if q.options.len() < 2 || q.options.len() > 4 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("expected 2-4 options, found {}", q.options.len()),
            });
        }
    }

    // Check for empty prompts
    for q in bank.levels.values().flatten() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    // A bank with no questions at a level cannot fill that level's quota
    for level in crate::model::ALL_LEVELS {
        if bank.questions_for(level).is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("no questions at level {level}"),
            });
        }
    }

    warnings
}
