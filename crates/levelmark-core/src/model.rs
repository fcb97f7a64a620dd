//! Core data model types for levelmark.
//!
//! These are the fundamental types the entire levelmark system uses to
//! represent CEFR levels, abilities, questions, and question banks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A CEFR proficiency level, ordered A1 (lowest) through C2 (highest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// All levels in ascending order.
pub const ALL_LEVELS: [Level; 6] = [
    Level::A1,
    Level::A2,
    Level::B1,
    Level::B2,
    Level::C1,
    Level::C2,
];

impl Level {
    /// Static display metadata for this level.
    pub fn info(&self) -> &'static LevelInfo {
        match self {
            Level::A1 => &LevelInfo {
                name: "Beginner",
                description: "basic everyday expressions",
                vocabulary_range: (500, 1000),
                color: "#4ade80",
            },
            Level::A2 => &LevelInfo {
                name: "Elementary",
                description: "simple routine exchanges",
                vocabulary_range: (1000, 2000),
                color: "#22d3ee",
            },
            Level::B1 => &LevelInfo {
                name: "Intermediate",
                description: "clear expression on familiar topics",
                vocabulary_range: (2000, 3000),
                color: "#3b82f6",
            },
            Level::B2 => &LevelInfo {
                name: "Upper Intermediate",
                description: "fluent, detailed expression",
                vocabulary_range: (3000, 4000),
                color: "#8b5cf6",
            },
            Level::C1 => &LevelInfo {
                name: "Advanced",
                description: "flexible and effective language use",
                vocabulary_range: (4000, 6000),
                color: "#f59e0b",
            },
            Level::C2 => &LevelInfo {
                name: "Proficient",
                description: "precise shades of meaning",
                vocabulary_range: (6000, 10000),
                color: "#ef4444",
            },
        }
    }

    /// The next level up, or `None` at C2.
    pub fn next(&self) -> Option<Level> {
        let idx = ALL_LEVELS.iter().position(|l| l == self)?;
        ALL_LEVELS.get(idx + 1).copied()
    }

    /// The next level down, or `None` at A1.
    pub fn prev(&self) -> Option<Level> {
        let idx = ALL_LEVELS.iter().position(|l| l == self)?;
        idx.checked_sub(1).and_then(|i| ALL_LEVELS.get(i)).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::A1 => write!(f, "A1"),
            Level::A2 => write!(f, "A2"),
            Level::B1 => write!(f, "B1"),
            Level::B2 => write!(f, "B2"),
            Level::C1 => write!(f, "C1"),
            Level::C2 => write!(f, "C2"),
        }
    }
}

impl FromStr for Level {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            other => Err(CoreError::UnknownLevel(other.to_string())),
        }
    }
}

/// Display metadata attached to a [`Level`].
#[derive(Debug, Clone, Serialize)]
pub struct LevelInfo {
    /// Human-readable level name.
    pub name: &'static str,
    /// One-line capability description.
    pub description: &'static str,
    /// Expected active vocabulary size, lower and upper bound.
    pub vocabulary_range: (u32, u32),
    /// Badge color (hex), display-only.
    pub color: &'static str,
}

/// The skill dimension a question measures, used for sub-score aggregation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Vocabulary,
    Grammar,
    Comprehension,
    Reasoning,
    Inference,
    Analysis,
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ability::Vocabulary => write!(f, "vocabulary"),
            Ability::Grammar => write!(f, "grammar"),
            Ability::Comprehension => write!(f, "comprehension"),
            Ability::Reasoning => write!(f, "reasoning"),
            Ability::Inference => write!(f, "inference"),
            Ability::Analysis => write!(f, "analysis"),
        }
    }
}

impl FromStr for Ability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" => Ok(Ability::Vocabulary),
            "grammar" => Ok(Ability::Grammar),
            "comprehension" => Ok(Ability::Comprehension),
            "reasoning" => Ok(Ability::Reasoning),
            "inference" => Ok(Ability::Inference),
            "analysis" => Ok(Ability::Analysis),
            other => Err(CoreError::UnknownAbility(other.to_string())),
        }
    }
}

/// The question type tag carried by bank entries.
///
/// The long tail of quiz-style tags all aggregate into the comprehension or
/// analysis ability dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Vocabulary,
    Grammar,
    Comprehension,
    Reasoning,
    Inference,
    Analysis,
    CriticalThinking,
    Synthesis,
    CriticalAnalysis,
    NuancedInterpretation,
}

impl QuestionKind {
    /// The ability dimension this question kind contributes to.
    pub fn ability(&self) -> Ability {
        match self {
            QuestionKind::Vocabulary => Ability::Vocabulary,
            QuestionKind::Grammar => Ability::Grammar,
            QuestionKind::Comprehension => Ability::Comprehension,
            QuestionKind::Reasoning => Ability::Reasoning,
            QuestionKind::Inference => Ability::Inference,
            QuestionKind::Analysis
            | QuestionKind::CriticalThinking
            | QuestionKind::Synthesis
            | QuestionKind::CriticalAnalysis
            | QuestionKind::NuancedInterpretation => Ability::Analysis,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionKind::Vocabulary => "vocabulary",
            QuestionKind::Grammar => "grammar",
            QuestionKind::Comprehension => "comprehension",
            QuestionKind::Reasoning => "reasoning",
            QuestionKind::Inference => "inference",
            QuestionKind::Analysis => "analysis",
            QuestionKind::CriticalThinking => "critical_thinking",
            QuestionKind::Synthesis => "synthesis",
            QuestionKind::CriticalAnalysis => "critical_analysis",
            QuestionKind::NuancedInterpretation => "nuanced_interpretation",
        };
        write!(f, "{s}")
    }
}

/// A learning module within the application shell, in navigation order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    #[default]
    Assessment,
    Flashcards,
    Reading,
    Quiz,
    Poster,
}

/// All modules in navigation order.
pub const ALL_MODULES: [ModuleId; 5] = [
    ModuleId::Assessment,
    ModuleId::Flashcards,
    ModuleId::Reading,
    ModuleId::Quiz,
    ModuleId::Poster,
];

impl ModuleId {
    /// Position in the navigation sequence, starting at the assessment.
    pub fn sequence_index(&self) -> usize {
        match self {
            ModuleId::Assessment => 0,
            ModuleId::Flashcards => 1,
            ModuleId::Reading => 2,
            ModuleId::Quiz => 3,
            ModuleId::Poster => 4,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModuleId::Assessment => "assessment",
            ModuleId::Flashcards => "flashcards",
            ModuleId::Reading => "reading",
            ModuleId::Quiz => "quiz",
            ModuleId::Poster => "poster",
        };
        write!(f, "{s}")
    }
}

/// A single multiple-choice test item. Immutable once parsed from a bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Question type tag.
    pub kind: QuestionKind,
    /// The CEFR level this question targets.
    pub level: Level,
    /// Optional reading passage shown before the prompt.
    #[serde(default)]
    pub context: Option<String>,
    /// The prompt text.
    pub prompt: String,
    /// Ordered option strings (2–4).
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct: usize,
    /// Ability dimension used for aggregation.
    pub ability: Ability,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Whether `choice` selects the correct option.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }
}

/// A static catalog of questions keyed by level. Populated once at load,
/// read-only thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Bank identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the bank.
    #[serde(default)]
    pub description: String,
    /// Questions grouped by target level.
    pub levels: BTreeMap<Level, Vec<Question>>,
}

impl QuestionBank {
    /// Questions targeting `level`, empty if the bank has none.
    pub fn questions_for(&self, level: Level) -> &[Question] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of questions across all levels.
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Whether the bank holds no questions at all.
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }
}
