//! Randomized bounded search for the best-balanced pair of sides.

use crate::config::BalanceConfig;
use crate::data::PlayerPair;
use crate::engine::assign::{Assignment, PositionAssigner};
use crate::engine::complement::{ComplementarityAnalyzer, LineReport};
use crate::engine::history::{HistoryEntry, HistoryPenalizer};
use crate::engine::scoring::PlayerScorer;
use crate::engine::synergy::SynergyEngine;
use crate::engine::validate::ConstraintValidator;
use crate::error::{BalanceError, Result};
use crate::models::{Category, Player};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashSet;

/// One assigned player as reported to callers.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub name: String,
    pub position: crate::models::Position,
    /// Score at the assigned position.
    pub score: f64,
    /// 1-based preference rank of the assigned position.
    pub priority: usize,
    pub global_score: f64,
    pub category: Category,
}

/// Full evaluation of one side, component by component.
#[derive(Debug, Clone, Serialize)]
pub struct TeamEvaluation {
    /// base + synergy + complementarity - anti-synergy - repetition.
    pub score: f64,
    /// Sum of assigned per-position scores.
    pub base_score: f64,
    pub synergy: f64,
    pub complementarity: f64,
    pub anti_synergy: f64,
    pub repetition_penalty: f64,
    pub elite_count: usize,
    pub moderate_count: usize,
    pub weak_count: usize,
    pub leadership: f64,
    pub individuality: f64,
    pub condition: f64,
    pub lines: Vec<LineReport>,
    pub players: Vec<PlayerReport>,
}

impl TeamEvaluation {
    /// Names of the side, in assignment order.
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub team_a: TeamEvaluation,
    pub team_b: TeamEvaluation,
    /// Partitions that passed both validation stages.
    pub valid_attempts: u32,
}

/// Orchestrates randomized trials over a 14-player pool and keeps the pair
/// with the lowest combined imbalance. Fully deterministic for a given seed.
pub struct TeamSearch {
    config: BalanceConfig,
    scorer: PlayerScorer,
    assigner: PositionAssigner,
    validator: ConstraintValidator,
    analyzer: ComplementarityAnalyzer,
    synergy: SynergyEngine,
    penalizer: HistoryPenalizer,
}

impl TeamSearch {
    pub fn new(
        config: &BalanceConfig,
        synergies: &[PlayerPair],
        anti_synergies: &[PlayerPair],
    ) -> Result<Self> {
        config.validate()?;
        let scorer = PlayerScorer::new(config);
        Ok(Self {
            config: config.clone(),
            scorer: scorer.clone(),
            assigner: PositionAssigner::new(config.composition.clone(), scorer),
            validator: ConstraintValidator::new(config),
            analyzer: ComplementarityAnalyzer::new(config),
            synergy: SynergyEngine::new(config, synergies.to_vec(), anti_synergies.to_vec()),
            penalizer: HistoryPenalizer::new(config),
        })
    }

    /// Run the bounded trial loop. The pool must hold exactly two sides'
    /// worth of distinct players; `history` is the accumulated record and is
    /// never mutated here.
    pub fn search(
        &self,
        pool: &[Player],
        history: &[HistoryEntry],
        seed: u64,
    ) -> Result<SearchOutcome> {
        let team_size = self.config.composition.total();
        let expected = 2 * team_size;
        if pool.len() != expected {
            return Err(BalanceError::InvalidPoolSize { expected, found: pool.len() });
        }
        let mut seen = HashSet::new();
        for player in pool {
            if !seen.insert(player.name.as_str()) {
                return Err(BalanceError::DuplicatePlayer(player.name.clone()));
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck: Vec<Player> = pool.to_vec();
        let max_attempts = self.config.budget.max_valid_attempts;
        let max_trials = self.config.budget.max_raw_trials();

        let mut best: Option<(f64, TeamEvaluation, TeamEvaluation)> = None;
        let mut valid_attempts: u32 = 0;
        let mut trials: u64 = 0;

        while trials < max_trials && valid_attempts < max_attempts {
            trials += 1;
            deck.shuffle(&mut rng);
            let (side_a, side_b) = deck.split_at(team_size);

            if self.validator.validate_roster(side_a).is_err()
                || self.validator.validate_roster(side_b).is_err()
            {
                continue;
            }

            let assignment_a = self.assigner.assign(side_a);
            let assignment_b = self.assigner.assign(side_b);
            if self.validator.validate_assignment(&assignment_a).is_err()
                || self.validator.validate_assignment(&assignment_b).is_err()
            {
                continue;
            }

            valid_attempts += 1;
            let eval_a = self.evaluate(side_a, &assignment_a, history);
            let eval_b = self.evaluate(side_b, &assignment_b, history);
            let imbalance = Self::imbalance(&eval_a, &eval_b);

            let improved = match &best {
                None => true,
                Some((current, _, _)) => imbalance < *current,
            };
            if improved {
                best = Some((imbalance, eval_a, eval_b));
            }
        }

        log::debug!(
            "search finished: {} valid attempts over {} trials (seed {})",
            valid_attempts,
            trials,
            seed
        );

        match best {
            Some((_, team_a, team_b)) => Ok(SearchOutcome { team_a, team_b, valid_attempts }),
            None => Err(BalanceError::NoValidPairing { trials }),
        }
    }

    /// Combined imbalance: score gap plus weighted attribute-sum gaps.
    fn imbalance(a: &TeamEvaluation, b: &TeamEvaluation) -> f64 {
        (a.score - b.score).abs()
            + 0.5 * (a.leadership - b.leadership).abs()
            + 0.3 * (a.individuality - b.individuality).abs()
            + 0.3 * (a.condition - b.condition).abs()
    }

    fn evaluate(
        &self,
        side: &[Player],
        assignment: &Assignment,
        history: &[HistoryEntry],
    ) -> TeamEvaluation {
        let base_score: f64 = assignment.slots.iter().map(|s| s.score).sum();
        let names = assignment.names();
        let synergy = self.synergy.synergy_bonus(&names);
        let anti_synergy = self.synergy.anti_synergy_penalty(assignment);
        let complementarity = self.analyzer.analyze(assignment);
        let repetition_penalty = self.penalizer.repetition_penalty(&names, history);

        let mut elite_count = 0;
        let mut moderate_count = 0;
        let mut weak_count = 0;
        for player in side {
            match self.scorer.category(player) {
                Category::Elite => elite_count += 1,
                Category::Moderate => moderate_count += 1,
                Category::Weak => weak_count += 1,
            }
        }

        let players = assignment
            .slots
            .iter()
            .filter_map(|slot| {
                side.iter().find(|p| p.name == slot.name).map(|player| PlayerReport {
                    name: slot.name.clone(),
                    position: slot.position,
                    score: slot.score,
                    priority: slot.priority_rank + 1,
                    global_score: self.scorer.global_score(player),
                    category: self.scorer.category(player),
                })
            })
            .collect();

        TeamEvaluation {
            score: base_score + synergy + complementarity.net - anti_synergy
                - repetition_penalty,
            base_score,
            synergy,
            complementarity: complementarity.net,
            anti_synergy,
            repetition_penalty,
            elite_count,
            moderate_count,
            weak_count,
            leadership: side.iter().map(|p| p.leadership).sum(),
            individuality: side.iter().map(|p| p.individuality).sum(),
            condition: side.iter().map(|p| p.condition).sum(),
            lines: complementarity.lines,
            players,
        }
    }
}
