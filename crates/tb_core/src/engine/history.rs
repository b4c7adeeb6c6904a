//! Penalty for repeating recently generated pairings.

use crate::config::BalanceConfig;
use std::collections::HashSet;

/// One remembered side: the names that played together. Entries are stored
/// oldest first; every generated match contributes two consecutive entries.
pub type HistoryEntry = Vec<String>;

/// A side overlapping a remembered one by this much is a near-duplicate and
/// is penalized doubly.
const NEAR_DUPLICATE_OVERLAP: usize = 5;

/// Scores a candidate side against the recent-match history.
#[derive(Debug, Clone)]
pub struct HistoryPenalizer {
    repetition_weight: f64,
}

impl HistoryPenalizer {
    pub fn new(config: &BalanceConfig) -> Self {
        Self { repetition_weight: config.weights.repetition }
    }

    /// Overlap with each remembered side, weighted by a linear recency factor
    /// (`1.5 - i/H` for reverse index `i` over `H` entries) and doubled for
    /// near-duplicates. Empty history always yields 0.
    pub fn repetition_penalty(&self, names: &[String], history: &[HistoryEntry]) -> f64 {
        if history.is_empty() {
            return 0.0;
        }
        let team: HashSet<&str> = names.iter().map(String::as_str).collect();
        let total = history.len() as f64;
        let mut penalty = 0.0;
        for (i, old) in history.iter().rev().enumerate() {
            let recency = 1.5 - i as f64 / total;
            let overlap = old.iter().filter(|n| team.contains(n.as_str())).count();
            let mut contribution = overlap as f64 * self.repetition_weight * recency;
            if overlap >= NEAR_DUPLICATE_OVERLAP {
                contribution *= 2.0;
            }
            penalty += contribution;
        }
        penalty
    }
}
