//! Typed configuration for the balancing engine.
//!
//! Every threshold the engine consults lives here as a named, validated field.
//! A config is built once at startup and injected into the components; nothing
//! reads ambient global state.

use crate::error::{BalanceError, Result};
use crate::models::Position;
use serde::{Deserialize, Serialize};

/// How many players each position takes in one side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Composition {
    pub fn capacity(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    /// Side size implied by the composition.
    pub fn total(&self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self { goalkeepers: 1, defenders: 2, midfielders: 3, forwards: 1 }
    }
}

/// Weights applied when scoring players and combining team components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Leadership contribution to a per-position score.
    pub leadership: f64,
    /// Individuality contribution to a per-position score.
    pub individuality: f64,
    /// Condition contribution to a per-position score.
    pub condition: f64,
    /// Bonus per configured synergy pair present in a side.
    pub synergy: f64,
    /// Penalty per configured anti-synergy pair sharing an assigned position.
    pub anti_synergy_same_position: f64,
    /// Weight of the history-overlap repetition penalty.
    pub repetition: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            leadership: 0.3,
            individuality: 0.15,
            condition: 0.2,
            synergy: 2.0,
            anti_synergy_same_position: 5.0,
            repetition: 0.1,
        }
    }
}

/// Roster-level bounds a candidate side must satisfy before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConstraints {
    pub elite_min: usize,
    pub elite_max: usize,
    pub weak_min: usize,
    pub weak_max: usize,
    pub leadership_min: f64,
    pub leadership_max: f64,
    pub individuality_min: f64,
    pub individuality_max: f64,
    pub condition_min: f64,
}

impl Default for RosterConstraints {
    fn default() -> Self {
        Self {
            elite_min: 1,
            elite_max: 3,
            weak_min: 1,
            weak_max: 3,
            leadership_min: 12.0,
            leadership_max: 35.0,
            individuality_min: 20.0,
            individuality_max: 50.0,
            condition_min: 25.0,
        }
    }
}

/// Line-level composition rules used by validation and complementarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRules {
    /// A per-position score at or below this counts as weak for its group.
    pub weak_position_threshold: f64,
    /// Tolerated players strictly below the weak threshold per line.
    pub max_weak_per_line: usize,
    pub min_defense_total: f64,
    pub min_midfield_total: f64,
    /// Bonus for a line whose score spread sits in the balanced band.
    pub balanced_line_bonus: f64,
}

impl Default for LineRules {
    fn default() -> Self {
        Self {
            weak_position_threshold: 7.5,
            max_weak_per_line: 1,
            min_defense_total: 14.0,
            min_midfield_total: 20.0,
            balanced_line_bonus: 1.5,
        }
    }
}

/// Bounds on the randomized search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Stop after this many partitions passed validation.
    pub max_valid_attempts: u32,
    /// Raw-trial ceiling as a multiple of `max_valid_attempts`.
    pub trial_multiplier: u32,
}

impl SearchBudget {
    pub fn max_raw_trials(&self) -> u64 {
        self.max_valid_attempts as u64 * self.trial_multiplier as u64
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self { max_valid_attempts: 5000, trial_multiplier: 3 }
    }
}

/// Full engine configuration, immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub composition: Composition,
    pub weights: ScoringWeights,
    /// Global score at or above this classifies a player as elite.
    pub elite_threshold: f64,
    /// Global score strictly below this classifies a player as weak.
    pub weak_threshold: f64,
    pub constraints: RosterConstraints,
    pub lines: LineRules,
    pub budget: SearchBudget,
    /// Matches the history store keeps (two entries per match).
    pub max_history: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            composition: Composition::default(),
            weights: ScoringWeights::default(),
            elite_threshold: 10.0,
            weak_threshold: 7.0,
            constraints: RosterConstraints::default(),
            lines: LineRules::default(),
            budget: SearchBudget::default(),
            max_history: 5,
        }
    }
}

impl BalanceConfig {
    /// Check the config once at load; later code can rely on these invariants.
    pub fn validate(&self) -> Result<()> {
        if self.composition.total() == 0 {
            return Err(BalanceError::InvalidConfig("composition is empty".to_string()));
        }
        if self.elite_threshold < self.weak_threshold {
            return Err(BalanceError::InvalidConfig(
                "elite threshold below weak threshold".to_string(),
            ));
        }
        if self.constraints.elite_min > self.constraints.elite_max {
            return Err(BalanceError::InvalidConfig("inverted elite count range".to_string()));
        }
        if self.constraints.weak_min > self.constraints.weak_max {
            return Err(BalanceError::InvalidConfig("inverted weak count range".to_string()));
        }
        if self.constraints.leadership_min > self.constraints.leadership_max {
            return Err(BalanceError::InvalidConfig("inverted leadership range".to_string()));
        }
        if self.constraints.individuality_min > self.constraints.individuality_max {
            return Err(BalanceError::InvalidConfig("inverted individuality range".to_string()));
        }
        if self.budget.max_valid_attempts == 0 || self.budget.trial_multiplier == 0 {
            return Err(BalanceError::InvalidConfig("search budget must be positive".to_string()));
        }
        let weights = [
            self.weights.leadership,
            self.weights.individuality,
            self.weights.condition,
            self.weights.synergy,
            self.weights.anti_synergy_same_position,
            self.weights.repetition,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BalanceError::InvalidConfig("non-finite weight".to_string()));
        }
        Ok(())
    }
}
