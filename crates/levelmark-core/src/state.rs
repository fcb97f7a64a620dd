//! Application state: the assigned level, ability profile, module progress,
//! and preferences, with event emission on every change.
//!
//! All cross-module reads go through this type. Modules never share mutable
//! globals; they observe changes by subscribing to the embedded bus.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::events::{Event, EventBus};
use crate::model::{Level, ModuleId};
use crate::score::AbilityScores;
use crate::session::AssessmentOutcome;

/// How bilingual reading passages are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingMode {
    /// Source text and translation side by side.
    #[default]
    Bilingual,
    /// Source text only.
    SourceOnly,
    /// Translation only.
    TranslationOnly,
}

/// Visual style of the achievement poster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosterStyle {
    #[default]
    Classic,
    Minimal,
    Vibrant,
}

/// Per-learner preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub reading_mode: ReadingMode,
    /// Flashcard difficulty band, 1 (easiest) through 6 (hardest).
    pub difficulty: u8,
    pub poster_style: PosterStyle,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reading_mode: ReadingMode::default(),
            difficulty: 3,
            poster_style: PosterStyle::default(),
        }
    }
}

/// Progress a module has reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    pub completed: u32,
    pub total: u32,
}

impl ModuleProgress {
    /// Completion percentage, 0 when the module reported no total.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u8
    }
}

/// The learner's application state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    level: Option<Level>,
    abilities: AbilityScores,
    current_module: ModuleId,
    progress: BTreeMap<ModuleId, ModuleProgress>,
    preferences: Preferences,
    #[serde(skip)]
    bus: EventBus,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assigned CEFR level, if any.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Ability profile from the most recent assessment.
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    /// Set the flashcard difficulty band, clamped to 1 through 6.
    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.preferences.difficulty = difficulty.clamp(1, 6);
    }

    /// The event bus modules subscribe to.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// The module the learner is currently in.
    pub fn current_module(&self) -> ModuleId {
        self.current_module
    }

    /// Whether a module can be opened. The placement assessment is always
    /// open; a placed learner can open anything; an unplaced learner can
    /// only step to the next module in the navigation sequence.
    pub fn is_module_accessible(&self, module: ModuleId) -> bool {
        if module == ModuleId::Assessment {
            return true;
        }
        if self.level.is_some() {
            return true;
        }
        module.sequence_index() <= self.current_module.sequence_index() + 1
    }

    /// Open a module. Returns false, without switching, when it is locked.
    pub fn navigate_to(&mut self, module: ModuleId) -> bool {
        if !self.is_module_accessible(module) {
            return false;
        }
        self.current_module = module;
        true
    }

    /// Assign a level directly, emitting [`Event::LevelChanged`] with the
    /// current ability profile.
    pub fn set_level(&mut self, level: Level) {
        let previous = self.level.replace(level);
        self.bus.emit(&Event::LevelChanged {
            previous,
            level,
            abilities: self.abilities.clone(),
        });
    }

    /// Adopt a completed assessment outcome: level and ability profile.
    pub fn apply_assessment(&mut self, outcome: &AssessmentOutcome) {
        self.abilities = outcome.breakdown.abilities.clone();
        self.set_level(outcome.level);
    }

    /// Clear the assigned level ahead of a retake, emitting
    /// [`Event::LevelCleared`]. A no-op with no level assigned. Whether to
    /// ask the learner for confirmation is the front-end's concern.
    pub fn clear_level(&mut self) {
        if let Some(previous) = self.level.take() {
            self.abilities = AbilityScores::default();
            self.bus.emit(&Event::LevelCleared { previous });
        }
    }

    /// Progress reported by `module`, zero if it never reported.
    pub fn progress(&self, module: ModuleId) -> ModuleProgress {
        self.progress.get(&module).copied().unwrap_or_default()
    }

    /// Record module progress, emitting [`Event::ProgressUpdated`].
    pub fn update_progress(&mut self, module: ModuleId, completed: u32, total: u32) {
        self.progress
            .insert(module, ModuleProgress { completed, total });
        self.bus.emit(&Event::ProgressUpdated {
            module,
            completed,
            total,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture(state: &mut AppState) -> Arc<Mutex<Vec<Event>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log2 = Arc::clone(&log);
        state.bus_mut().subscribe(move |e| {
            log2.lock().unwrap().push(e.clone());
            Ok(())
        });
        log
    }

    #[test]
    fn unplaced_learner_can_only_step_forward() {
        let state = AppState::new();
        // From the assessment, only the next module in sequence opens.
        assert!(state.is_module_accessible(ModuleId::Assessment));
        assert!(state.is_module_accessible(ModuleId::Flashcards));
        assert!(!state.is_module_accessible(ModuleId::Reading));
        assert!(!state.is_module_accessible(ModuleId::Quiz));
        assert!(!state.is_module_accessible(ModuleId::Poster));
    }

    #[test]
    fn navigation_unlocks_the_next_module() {
        let mut state = AppState::new();
        assert!(state.navigate_to(ModuleId::Flashcards));
        assert_eq!(state.current_module(), ModuleId::Flashcards);
        assert!(state.is_module_accessible(ModuleId::Reading));
        assert!(!state.is_module_accessible(ModuleId::Quiz));
        // A locked target is refused and the position stays put.
        assert!(!state.navigate_to(ModuleId::Quiz));
        assert_eq!(state.current_module(), ModuleId::Flashcards);
        // The assessment stays reachable from anywhere.
        assert!(state.navigate_to(ModuleId::Assessment));
    }

    #[test]
    fn everything_opens_once_placed() {
        let mut state = AppState::new();
        state.set_level(Level::A2);
        for module in crate::model::ALL_MODULES {
            assert!(state.is_module_accessible(module), "{module} locked");
        }
    }

    #[test]
    fn set_level_emits_change_with_previous() {
        let mut state = AppState::new();
        let log = capture(&mut state);
        state.set_level(Level::B1);
        state.set_level(Level::B2);
        let events = log.lock().unwrap();
        assert_eq!(
            events[0],
            Event::LevelChanged {
                previous: None,
                level: Level::B1,
                abilities: AbilityScores::default(),
            }
        );
        assert_eq!(
            events[1],
            Event::LevelChanged {
                previous: Some(Level::B1),
                level: Level::B2,
                abilities: AbilityScores::default(),
            }
        );
    }

    #[test]
    fn assessment_broadcast_carries_the_ability_profile() {
        use crate::score::{self, ASSESSMENT_ABILITIES};
        use crate::session::AssessmentOutcome;

        let abilities = AbilityScores::from_tallies(
            &ASSESSMENT_ABILITIES,
            &[
                (crate::model::Ability::Vocabulary, 3, 4),
                (crate::model::Ability::Grammar, 2, 4),
                (crate::model::Ability::Comprehension, 4, 4),
                (crate::model::Ability::Reasoning, 1, 4),
            ],
        );
        let breakdown = crate::score::ScoreBreakdown {
            overall: 63,
            correct: 10,
            answered: 16,
            total: 16,
            abilities: abilities.clone(),
        };
        let final_score = score::final_score(&breakdown);
        let outcome = AssessmentOutcome {
            level: score::determine_level(final_score),
            breakdown,
            final_score,
        };

        let mut state = AppState::new();
        let log = capture(&mut state);
        state.apply_assessment(&outcome);

        let events = log.lock().unwrap();
        match &events[0] {
            Event::LevelChanged {
                level,
                abilities: broadcast,
                ..
            } => {
                assert_eq!(*level, outcome.level);
                assert_eq!(*broadcast, abilities);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn clear_level_resets_and_emits() {
        let mut state = AppState::new();
        state.set_level(Level::C1);
        let log = capture(&mut state);
        state.clear_level();
        assert_eq!(state.level(), None);
        assert!(state.abilities().is_empty());
        assert_eq!(
            log.lock().unwrap()[0],
            Event::LevelCleared {
                previous: Level::C1
            }
        );
    }

    #[test]
    fn clear_without_level_is_silent() {
        let mut state = AppState::new();
        let log = capture(&mut state);
        state.clear_level();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn progress_updates_emit_and_persist() {
        let mut state = AppState::new();
        let log = capture(&mut state);
        state.update_progress(ModuleId::Flashcards, 12, 40);
        assert_eq!(state.progress(ModuleId::Flashcards).percent(), 30);
        assert_eq!(state.progress(ModuleId::Reading).percent(), 0);
        assert_eq!(
            log.lock().unwrap()[0],
            Event::ProgressUpdated {
                module: ModuleId::Flashcards,
                completed: 12,
                total: 40
            }
        );
    }

    #[test]
    fn difficulty_is_clamped_to_band() {
        let mut state = AppState::new();
        state.set_difficulty(0);
        assert_eq!(state.preferences().difficulty, 1);
        state.set_difficulty(9);
        assert_eq!(state.preferences().difficulty, 6);
        state.set_difficulty(4);
        assert_eq!(state.preferences().difficulty, 4);
    }
}
