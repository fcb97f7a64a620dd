//! Achievement poster: a shareable summary of a learner's level, study
//! statistics, earned badges, and their journey along the CEFR ladder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use levelmark_core::model::{Level, ALL_LEVELS};
use levelmark_core::state::PosterStyle;

/// Study statistics shown on the poster. Defaults stand in for learners
/// without tracked history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterStats {
    pub words_learned: u32,
    pub best_score: u8,
    pub streak_days: u32,
    pub articles_read: u32,
    pub accuracy: u8,
}

impl Default for PosterStats {
    fn default() -> Self {
        Self {
            words_learned: 150,
            best_score: 85,
            streak_days: 30,
            articles_read: 5,
            accuracy: 85,
        }
    }
}

/// An earned badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub detail: String,
}

/// Badges earned for a level and statistics. The level badge always comes
/// first; the rest unlock at fixed thresholds.
pub fn achievements(level: Level, stats: &PosterStats) -> Vec<Achievement> {
    let info = level.info();
    let mut earned = vec![Achievement {
        title: format!("{level} {}", info.name),
        detail: format!("Certified at CEFR {level}: {}", info.description),
    }];

    if stats.words_learned >= 100 {
        earned.push(Achievement {
            title: "Word Collector".into(),
            detail: format!("Learned {} words", stats.words_learned),
        });
    }
    if stats.best_score >= 80 {
        earned.push(Achievement {
            title: "High Scorer".into(),
            detail: format!("Best quiz score {}%", stats.best_score),
        });
    }
    if stats.streak_days >= 30 {
        earned.push(Achievement {
            title: "Consistent Learner".into(),
            detail: format!("{} day study streak", stats.streak_days),
        });
    }

    earned
}

/// Where a ladder rung sits relative to the learner's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStatus {
    Completed,
    Current,
    Future,
}

/// One rung of the CEFR ladder on the poster timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub level: Level,
    pub status: TimelineStatus,
}

/// The full A1 through C2 ladder: rungs below `level` completed, `level`
/// itself current, the rest future.
pub fn timeline(level: Level) -> Vec<TimelineEntry> {
    ALL_LEVELS
        .iter()
        .map(|&l| TimelineEntry {
            level: l,
            status: if l < level {
                TimelineStatus::Completed
            } else if l == level {
                TimelineStatus::Current
            } else {
                TimelineStatus::Future
            },
        })
        .collect()
}

/// A rendered-ready poster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poster {
    pub level: Level,
    pub stats: PosterStats,
    pub style: PosterStyle,
    pub achievements: Vec<Achievement>,
    pub timeline: Vec<TimelineEntry>,
    /// Short certificate code printed on the poster.
    pub certificate_id: String,
    pub issued_on: DateTime<Utc>,
}

impl Poster {
    /// Assemble a poster for `level` with the given statistics and style.
    pub fn build(level: Level, stats: PosterStats, style: PosterStyle) -> Self {
        Self {
            level,
            stats,
            style,
            achievements: achievements(level, &stats),
            timeline: timeline(level),
            certificate_id: certificate_id(),
            issued_on: Utc::now(),
        }
    }

    /// The badge color for the poster's level.
    pub fn color(&self) -> &'static str {
        self.level.info().color
    }
}

/// An eight-character uppercase certificate code.
fn certificate_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("CEFR-{}", &uuid[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_match_the_placeholder_profile() {
        let stats = PosterStats::default();
        assert_eq!(stats.words_learned, 150);
        assert_eq!(stats.best_score, 85);
        assert_eq!(stats.streak_days, 30);
        assert_eq!(stats.articles_read, 5);
        assert_eq!(stats.accuracy, 85);
    }

    #[test]
    fn level_badge_comes_first() {
        let earned = achievements(Level::B2, &PosterStats::default());
        assert!(earned[0].title.contains("B2"));
        assert!(earned[0].title.contains("Upper Intermediate"));
    }

    #[test]
    fn default_stats_earn_every_threshold_badge() {
        let earned = achievements(Level::A1, &PosterStats::default());
        let titles: Vec<&str> = earned.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "A1 Beginner",
                "Word Collector",
                "High Scorer",
                "Consistent Learner"
            ]
        );
    }

    #[test]
    fn badges_respect_thresholds() {
        let stats = PosterStats {
            words_learned: 99,
            best_score: 79,
            streak_days: 29,
            articles_read: 0,
            accuracy: 50,
        };
        let earned = achievements(Level::C1, &stats);
        // Only the level badge survives.
        assert_eq!(earned.len(), 1);
    }

    #[test]
    fn timeline_splits_completed_current_future() {
        let entries = timeline(Level::B1);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].status, TimelineStatus::Completed);
        assert_eq!(entries[1].status, TimelineStatus::Completed);
        assert_eq!(entries[2].status, TimelineStatus::Current);
        assert_eq!(entries[3].status, TimelineStatus::Future);
        assert_eq!(entries[5].status, TimelineStatus::Future);
    }

    #[test]
    fn poster_carries_a_certificate_code() {
        let poster = Poster::build(Level::C2, PosterStats::default(), PosterStyle::Vibrant);
        assert!(poster.certificate_id.starts_with("CEFR-"));
        assert_eq!(poster.certificate_id.len(), 13);
        assert_eq!(poster.color(), "#ef4444");
        assert_eq!(poster.timeline.len(), 6);
    }
}
