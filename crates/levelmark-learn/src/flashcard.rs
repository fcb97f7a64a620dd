//! Flashcard deck: navigation, learned tracking, favorites, and study
//! filters over a cumulative vocabulary set.
//!
//! Navigation wraps around at both ends. Moving to another card always
//! shows its front face again. Learned words and favorites are keyed by
//! word, so they survive filter switches and deck rebuilds.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::LearnError;
use crate::vocab::VocabCard;

/// Which cards the deck currently cycles through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckMode {
    /// Every card in the study set.
    #[default]
    All,
    /// Only cards already marked learned, for quick review.
    Review,
    /// Only inherently hard or rare words.
    Difficult,
}

impl std::fmt::Display for DeckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckMode::All => write!(f, "all"),
            DeckMode::Review => write!(f, "review"),
            DeckMode::Difficult => write!(f, "difficult"),
        }
    }
}

/// Aggregate study numbers for the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total: usize,
    pub learned: usize,
    pub favorites: usize,
    /// round(learned / total × 100), 0 for an empty deck.
    pub percent_learned: u8,
}

/// A study deck over a learner's cumulative vocabulary set.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<VocabCard>,
    /// Indices into `cards` matching the current mode.
    order: Vec<usize>,
    position: usize,
    flipped: bool,
    mode: DeckMode,
    learned: BTreeSet<String>,
    favorites: Vec<String>,
}

impl FlashcardDeck {
    /// Build a deck over `cards` in [`DeckMode::All`].
    pub fn new(cards: Vec<VocabCard>) -> Result<Self, LearnError> {
        if cards.is_empty() {
            return Err(LearnError::EmptyDeck);
        }
        let order = (0..cards.len()).collect();
        Ok(Self {
            cards,
            order,
            position: 0,
            flipped: false,
            mode: DeckMode::All,
            learned: BTreeSet::new(),
            favorites: Vec::new(),
        })
    }

    pub fn mode(&self) -> DeckMode {
        self.mode
    }

    /// Cards visible under the current mode.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Zero-based position within the current cycle.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The card currently shown.
    pub fn current(&self) -> &VocabCard {
        &self.cards[self.order[self.position]]
    }

    /// Whether the back face (translation) is showing.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Toggle between front and back face.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move to the next card, wrapping past the end.
    pub fn next(&mut self) -> &VocabCard {
        self.position = (self.position + 1) % self.order.len();
        self.flipped = false;
        self.current()
    }

    /// Move to the previous card, wrapping past the start.
    pub fn prev(&mut self) -> &VocabCard {
        self.position = (self.position + self.order.len() - 1) % self.order.len();
        self.flipped = false;
        self.current()
    }

    /// Mark the current card as learned. Marking twice is a no-op.
    pub fn mark_learned(&mut self) {
        let word = self.current().word.clone();
        self.learned.insert(word);
    }

    pub fn is_learned(&self, word: &str) -> bool {
        self.learned.contains(word)
    }

    /// Add or remove the current card from favorites. Returns true if the
    /// card is a favorite afterwards.
    pub fn toggle_favorite(&mut self) -> bool {
        let word = self.current().word.clone();
        if let Some(pos) = self.favorites.iter().position(|w| *w == word) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(word);
            true
        }
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Switch the study filter, restarting the cycle from its first card.
    /// Fails without changing anything when no card matches.
    pub fn set_mode(&mut self, mode: DeckMode) -> Result<(), LearnError> {
        let order: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| match mode {
                DeckMode::All => true,
                DeckMode::Review => self.learned.contains(&card.word),
                DeckMode::Difficult => card.is_difficult(),
            })
            .map(|(i, _)| i)
            .collect();
        if order.is_empty() {
            return Err(LearnError::EmptyFilter(mode.to_string()));
        }
        self.mode = mode;
        self.order = order;
        self.position = 0;
        self.flipped = false;
        Ok(())
    }

    /// Study numbers over the full card set, independent of the filter.
    pub fn stats(&self) -> DeckStats {
        let total = self.cards.len();
        let learned = self.learned.len();
        let percent_learned = if total == 0 {
            0
        } else {
            (learned as f64 / total as f64 * 100.0).round() as u8
        };
        DeckStats {
            total,
            learned,
            favorites: self.favorites.len(),
            percent_learned,
        }
    }
}

/// Deadline-based auto-advance timer.
///
/// The timer holds nothing but the next deadline. Cancelling is idempotent
/// and polling after a cancel never fires, so a stale poll from a previous
/// schedule cannot advance the deck.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoAdvance {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Arm the timer: the next fire is `interval` after `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Disarm the timer. Safe to call repeatedly or while disarmed.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the deadline has passed, re-arming for the next interval.
    /// Returns true when the caller should advance the deck.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
