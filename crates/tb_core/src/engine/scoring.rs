//! Per-position and global player scoring.

use crate::config::{BalanceConfig, ScoringWeights};
use crate::models::{Category, Player, Position};

/// Returned when a player is scored at a position they cannot play.
pub const DISQUALIFIED_SCORE: f64 = -10.0;

/// Scores players against positions and classifies them into tiers.
///
/// Pure functions of player and configuration; no side effects.
#[derive(Debug, Clone)]
pub struct PlayerScorer {
    weights: ScoringWeights,
    elite_threshold: f64,
    weak_threshold: f64,
}

impl PlayerScorer {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            elite_threshold: config.elite_threshold,
            weak_threshold: config.weak_threshold,
        }
    }

    /// Proficiency at `position` plus the weighted attribute bonuses, or the
    /// disqualifying sentinel when the position is not playable.
    pub fn score_for_position(&self, player: &Player, position: Position) -> f64 {
        let Some(level) = player.level_for(position) else {
            return DISQUALIFIED_SCORE;
        };
        level
            + player.leadership * self.weights.leadership
            + player.individuality * self.weights.individuality
            + player.condition * self.weights.condition
    }

    /// Mean per-position score over every playable position; 0 for a player
    /// with no positions (invalid registry data, kept total).
    pub fn global_score(&self, player: &Player) -> f64 {
        if player.positions.is_empty() {
            return 0.0;
        }
        let sum: f64 =
            player.positions.iter().map(|&p| self.score_for_position(player, p)).sum();
        sum / player.positions.len() as f64
    }

    /// Elite at or above the elite threshold, weak strictly below the weak
    /// threshold, moderate in between. The weak boundary itself is moderate.
    pub fn category(&self, player: &Player) -> Category {
        let score = self.global_score(player);
        if score >= self.elite_threshold {
            Category::Elite
        } else if score < self.weak_threshold {
            Category::Weak
        } else {
            Category::Moderate
        }
    }
}
