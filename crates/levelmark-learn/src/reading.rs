//! Graded bilingual reading: leveled passages with paragraph-aligned
//! translations and word glosses, parsed from TOML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use levelmark_core::model::Level;
use levelmark_core::state::ReadingMode;

/// A glossed word: vocabulary from the passage worth studying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gloss {
    pub word: String,
    pub meaning: String,
}

/// A source paragraph with its aligned translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    pub source: String,
    pub translation: String,
}

/// A graded reading passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub title_translation: String,
    pub level: Level,
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub glosses: Vec<Gloss>,
}

impl Passage {
    /// Render the passage body as display lines for the given mode.
    /// Bilingual interleaves each source paragraph with its translation.
    pub fn render(&self, mode: ReadingMode) -> Vec<String> {
        let mut lines = Vec::new();
        for p in &self.paragraphs {
            match mode {
                ReadingMode::Bilingual => {
                    lines.push(p.source.clone());
                    lines.push(p.translation.clone());
                }
                ReadingMode::SourceOnly => lines.push(p.source.clone()),
                ReadingMode::TranslationOnly => lines.push(p.translation.clone()),
            }
        }
        lines
    }

    /// Gloss entries whose word actually occurs in the source text, used
    /// for leveled-word highlighting. Matching ignores case.
    pub fn leveled_words(&self) -> Vec<&Gloss> {
        self.glosses
            .iter()
            .filter(|g| {
                let needle = g.word.to_lowercase();
                self.paragraphs
                    .iter()
                    .any(|p| p.source.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Whitespace-separated word count of the source text.
    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|p| p.source.split_whitespace().count())
            .sum()
    }
}

/// A leveled passage catalog. Populated once at load, read-only after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingLibrary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Passages grouped by level.
    pub levels: BTreeMap<Level, Vec<Passage>>,
}

impl ReadingLibrary {
    /// Passages at exactly `level`.
    pub fn passages_for(&self, level: Level) -> &[Passage] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Passages to offer a learner at `level`: the level's own passages, or
    /// the nearest lower level that has any. A learner is never handed
    /// harder material as a fallback.
    pub fn best_for(&self, level: Level) -> Option<(Level, &[Passage])> {
        self.levels
            .range(..=level)
            .rev()
            .find(|(_, passages)| !passages.is_empty())
            .map(|(&l, passages)| (l, passages.as_slice()))
    }

    /// A single passage one level above, to preview what comes next.
    /// `None` at C2 or when the next level has no passages.
    pub fn preview_above(&self, level: Level) -> Option<&Passage> {
        let next = level.next()?;
        self.passages_for(next).first()
    }

    /// All glossed words a learner at `level` will encounter, lowest level
    /// first.
    pub fn glossed_words_up_to(&self, level: Level) -> Vec<&Gloss> {
        self.levels
            .range(..=level)
            .flat_map(|(_, passages)| passages.iter())
            .flat_map(|p| p.glosses.iter())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }
}

/// Intermediate TOML structure for parsing reading files.
#[derive(Debug, Deserialize)]
struct TomlReadingFile {
    library: TomlLibraryHeader,
    #[serde(default)]
    passages: Vec<TomlPassage>,
}

#[derive(Debug, Deserialize)]
struct TomlLibraryHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlPassage {
    id: String,
    title: String,
    #[serde(default)]
    title_translation: String,
    level: String,
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
    #[serde(default)]
    glosses: Vec<Gloss>,
}

/// Parse a single TOML file into a `ReadingLibrary`.
pub fn parse_reading(path: &Path) -> Result<ReadingLibrary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read passage file: {}", path.display()))?;
    parse_reading_str(&content, path)
}

/// Parse a TOML string into a `ReadingLibrary` (useful for testing).
pub fn parse_reading_str(content: &str, source_path: &Path) -> Result<ReadingLibrary> {
    let parsed: TomlReadingFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut levels: BTreeMap<Level, Vec<Passage>> = BTreeMap::new();
    for p in parsed.passages {
        let level: Level = p
            .level
            .parse()
            .with_context(|| format!("passage {}: bad level {:?}", p.id, p.level))?;
        levels.entry(level).or_default().push(Passage {
            id: p.id,
            title: p.title,
            title_translation: p.title_translation,
            level,
            paragraphs: p.paragraphs,
            glosses: p.glosses,
        });
    }

    Ok(ReadingLibrary {
        id: parsed.library.id,
        name: parsed.library.name,
        description: parsed.library.description,
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[library]
id = "starter"
name = "Starter Library"

[[passages]]
id = "a1-morning"
title = "A Morning Walk"
title_translation = "Une promenade matinale"
level = "A1"

[[passages.paragraphs]]
source = "The sun is up. I walk to the park."
translation = "Le soleil est levé. Je marche jusqu'au parc."

[[passages.paragraphs]]
source = "A dog runs past me."
translation = "Un chien passe devant moi en courant."

[[passages.glosses]]
word = "park"
meaning = "parc"

[[passages]]
id = "b1-market"
title = "At the Market"
level = "B1"

[[passages.paragraphs]]
source = "The market opens early, long before the streets fill up."
translation = "Le marché ouvre tôt, bien avant que les rues ne se remplissent."

[[passages.glosses]]
word = "market"
meaning = "marché"
"#;

    fn library() -> ReadingLibrary {
        parse_reading_str(VALID_TOML, &PathBuf::from("passages.toml")).unwrap()
    }

    #[test]
    fn parse_valid_toml() {
        let lib = library();
        assert_eq!(lib.id, "starter");
        assert_eq!(lib.len(), 2);
        let a1 = &lib.passages_for(Level::A1)[0];
        assert_eq!(a1.paragraphs.len(), 2);
        assert_eq!(a1.glosses[0].word, "park");
    }

    #[test]
    fn render_modes() {
        let lib = library();
        let passage = &lib.passages_for(Level::A1)[0];

        let bilingual = passage.render(ReadingMode::Bilingual);
        assert_eq!(bilingual.len(), 4);
        assert!(bilingual[0].starts_with("The sun"));
        assert!(bilingual[1].starts_with("Le soleil"));

        let source = passage.render(ReadingMode::SourceOnly);
        assert_eq!(source.len(), 2);
        assert!(source.iter().all(|l| !l.contains("soleil")));

        let translation = passage.render(ReadingMode::TranslationOnly);
        assert_eq!(translation.len(), 2);
        assert!(translation.iter().all(|l| !l.contains("sun")));
    }

    #[test]
    fn fallback_never_goes_up() {
        let lib = library();
        // A2 has no passages; the nearest lower level with content is A1.
        let (level, passages) = lib.best_for(Level::A2).unwrap();
        assert_eq!(level, Level::A1);
        assert_eq!(passages[0].id, "a1-morning");
        // B2 falls back to B1, not up to anything.
        let (level, _) = lib.best_for(Level::B2).unwrap();
        assert_eq!(level, Level::B1);
    }

    #[test]
    fn exact_level_wins_over_fallback() {
        let lib = library();
        let (level, passages) = lib.best_for(Level::B1).unwrap();
        assert_eq!(level, Level::B1);
        assert_eq!(passages[0].id, "b1-market");
    }

    #[test]
    fn preview_peeks_one_level_up() {
        let lib = library();
        // A2's next level is B1, which has a passage.
        assert_eq!(lib.preview_above(Level::A2).unwrap().id, "b1-market");
        // B1's next level is B2: nothing there.
        assert!(lib.preview_above(Level::B1).is_none());
        assert!(lib.preview_above(Level::C2).is_none());
    }

    #[test]
    fn glossed_words_accumulate_by_level() {
        let lib = library();
        let a1: Vec<&str> = lib
            .glossed_words_up_to(Level::A1)
            .iter()
            .map(|g| g.word.as_str())
            .collect();
        assert_eq!(a1, ["park"]);
        let b1: Vec<&str> = lib
            .glossed_words_up_to(Level::B1)
            .iter()
            .map(|g| g.word.as_str())
            .collect();
        assert_eq!(b1, ["park", "market"]);
    }

    #[test]
    fn leveled_words_must_occur_in_the_text() {
        let mut lib = library();
        let passage = &mut lib.levels.get_mut(&Level::A1).unwrap()[0];
        passage.glosses.push(Gloss {
            word: "ocean".into(),
            meaning: "océan".into(),
        });
        let words: Vec<&str> = passage.leveled_words().iter().map(|g| g.word.as_str()).collect();
        // "park" appears in the text, "ocean" does not.
        assert_eq!(words, ["park"]);
    }

    #[test]
    fn word_count_covers_all_paragraphs() {
        let lib = library();
        let passage = &lib.passages_for(Level::A1)[0];
        assert_eq!(passage.word_count(), 14);
    }
}
