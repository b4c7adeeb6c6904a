//! Configured pairwise chemistry effects.

use crate::config::BalanceConfig;
use crate::data::PlayerPair;
use crate::engine::assign::Assignment;
use crate::models::Position;
use std::collections::HashSet;

/// Applies the configured synergy and anti-synergy pair lists.
#[derive(Debug, Clone)]
pub struct SynergyEngine {
    synergies: Vec<PlayerPair>,
    anti_synergies: Vec<PlayerPair>,
    bonus_per_pair: f64,
    penalty_per_pair: f64,
}

impl SynergyEngine {
    pub fn new(
        config: &BalanceConfig,
        synergies: Vec<PlayerPair>,
        anti_synergies: Vec<PlayerPair>,
    ) -> Self {
        Self {
            synergies,
            anti_synergies,
            bonus_per_pair: config.weights.synergy,
            penalty_per_pair: config.weights.anti_synergy_same_position,
        }
    }

    /// Fixed bonus per configured pair fully present in the side, regardless
    /// of assigned positions.
    pub fn synergy_bonus(&self, names: &[String]) -> f64 {
        let team: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.synergies
            .iter()
            .filter(|pair| team.contains(pair.first()) && team.contains(pair.second()))
            .count() as f64
            * self.bonus_per_pair
    }

    /// Fixed penalty per configured anti-synergy pair whose both members are
    /// assigned to the same position. Sharing a team alone triggers nothing.
    pub fn anti_synergy_penalty(&self, assignment: &Assignment) -> f64 {
        let groups = assignment.by_position();
        let mut penalty = 0.0;
        for position in Position::ALL {
            let group = &groups[position.index()];
            if group.len() < 2 {
                continue;
            }
            let names: HashSet<&str> = group.iter().map(|s| s.name.as_str()).collect();
            for pair in &self.anti_synergies {
                if names.contains(pair.first()) && names.contains(pair.second()) {
                    penalty += self.penalty_per_pair;
                }
            }
        }
        penalty
    }
}
