//! Vocabulary banks: leveled word cards parsed from TOML.
//!
//! Cards are keyed by CEFR level. A learner at level N studies the
//! cumulative set of all cards at or below N, so placement at B1 unlocks
//! the A1, A2, and B1 vocabulary at once.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use levelmark_core::model::Level;

/// How common a word is in everyday usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    High,
    Medium,
    Low,
    VeryLow,
}

/// A single vocabulary card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabCard {
    /// The word being learned.
    pub word: String,
    /// Phonetic transcription, if provided.
    #[serde(default)]
    pub phonetic: Option<String>,
    /// Translation into the learner's language.
    pub translation: String,
    /// Example sentence using the word.
    #[serde(default)]
    pub example: String,
    /// Translation of the example sentence.
    #[serde(default)]
    pub example_translation: String,
    /// Word origin note, if provided.
    #[serde(default)]
    pub etymology: String,
    /// The CEFR level the word belongs to.
    pub level: Level,
    /// Usage frequency band.
    pub frequency: Frequency,
    /// Intrinsic difficulty, 1 (easiest) through 6.
    pub difficulty: u8,
}

impl VocabCard {
    /// Whether the card belongs in the difficult-words drill: inherently
    /// hard or rarely encountered.
    pub fn is_difficult(&self) -> bool {
        self.difficulty >= 4 || matches!(self.frequency, Frequency::Low | Frequency::VeryLow)
    }
}

/// A leveled vocabulary catalog. Populated once at load, read-only after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cards grouped by level.
    pub levels: BTreeMap<Level, Vec<VocabCard>>,
}

impl VocabBank {
    /// Cards at exactly `level`.
    pub fn cards_for(&self, level: Level) -> &[VocabCard] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The cumulative study set: every card at or below `level`, ordered
    /// lowest level first.
    pub fn cards_up_to(&self, level: Level) -> Vec<VocabCard> {
        self.levels
            .range(..=level)
            .flat_map(|(_, cards)| cards.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }
}

/// Intermediate TOML structure for parsing vocabulary files.
#[derive(Debug, Deserialize)]
struct TomlVocabFile {
    bank: TomlVocabHeader,
    #[serde(default)]
    cards: Vec<TomlVocabCard>,
}

#[derive(Debug, Deserialize)]
struct TomlVocabHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlVocabCard {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    translation: String,
    #[serde(default)]
    example: String,
    #[serde(default)]
    example_translation: String,
    #[serde(default)]
    etymology: String,
    level: String,
    #[serde(default = "default_frequency")]
    frequency: Frequency,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
}

fn default_frequency() -> Frequency {
    Frequency::Medium
}

fn default_difficulty() -> u8 {
    3
}

/// Parse a single TOML file into a `VocabBank`.
pub fn parse_vocab(path: &Path) -> Result<VocabBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read vocabulary file: {}", path.display()))?;
    parse_vocab_str(&content, path)
}

/// Parse a TOML string into a `VocabBank` (useful for testing).
pub fn parse_vocab_str(content: &str, source_path: &Path) -> Result<VocabBank> {
    let parsed: TomlVocabFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut levels: BTreeMap<Level, Vec<VocabCard>> = BTreeMap::new();
    for card in parsed.cards {
        let level: Level = card
            .level
            .parse()
            .with_context(|| format!("card {:?}: bad level {:?}", card.word, card.level))?;
        levels.entry(level).or_default().push(VocabCard {
            word: card.word,
            phonetic: card.phonetic,
            translation: card.translation,
            example: card.example,
            example_translation: card.example_translation,
            etymology: card.etymology,
            level,
            frequency: card.frequency,
            difficulty: card.difficulty.clamp(1, 6),
        });
    }

    Ok(VocabBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        levels,
    })
}
