//! Roster-level and line-level constraint checks.

use crate::config::{BalanceConfig, LineRules, RosterConstraints};
use crate::engine::assign::Assignment;
use crate::engine::scoring::PlayerScorer;
use crate::models::{Category, Player, Position};
use std::fmt;

/// Why a candidate side was rejected before scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintViolation {
    EliteCount { found: usize, min: usize, max: usize },
    WeakCount { found: usize, min: usize, max: usize },
    LeadershipSum { found: f64, min: f64, max: f64 },
    IndividualitySum { found: f64, min: f64, max: f64 },
    ConditionSum { found: f64, min: f64 },
    IncompleteAssignment { unassigned: Vec<String> },
    WeakPositionGroup { position: Position, count: usize },
    DefenseBelowMinimum { total: f64, min: f64 },
    MidfieldBelowMinimum { total: f64, min: f64 },
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintViolation::EliteCount { found, min, max } => {
                write!(f, "elite count {} outside [{}, {}]", found, min, max)
            }
            ConstraintViolation::WeakCount { found, min, max } => {
                write!(f, "weak count {} outside [{}, {}]", found, min, max)
            }
            ConstraintViolation::LeadershipSum { found, min, max } => {
                write!(f, "leadership sum {} outside [{}, {}]", found, min, max)
            }
            ConstraintViolation::IndividualitySum { found, min, max } => {
                write!(f, "individuality sum {} outside [{}, {}]", found, min, max)
            }
            ConstraintViolation::ConditionSum { found, min } => {
                write!(f, "condition sum {} below minimum {}", found, min)
            }
            ConstraintViolation::IncompleteAssignment { unassigned } => {
                write!(f, "unassigned players: {}", unassigned.join(", "))
            }
            ConstraintViolation::WeakPositionGroup { position, count } => {
                write!(f, "{} weak players at {}", count, position)
            }
            ConstraintViolation::DefenseBelowMinimum { total, min } => {
                write!(f, "defense total {} below minimum {}", total, min)
            }
            ConstraintViolation::MidfieldBelowMinimum { total, min } => {
                write!(f, "midfield total {} below minimum {}", total, min)
            }
        }
    }
}

/// Validates candidate sides against the configured constraints.
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    scorer: PlayerScorer,
    constraints: RosterConstraints,
    lines: LineRules,
}

impl ConstraintValidator {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            scorer: PlayerScorer::new(config),
            constraints: config.constraints.clone(),
            lines: config.lines.clone(),
        }
    }

    /// Category counts and attribute sums, checked in fixed order: elite,
    /// weak, leadership, individuality, condition. First failure wins.
    pub fn validate_roster(&self, team: &[Player]) -> Result<(), ConstraintViolation> {
        let c = &self.constraints;
        let elite =
            team.iter().filter(|p| self.scorer.category(p) == Category::Elite).count();
        if elite < c.elite_min || elite > c.elite_max {
            return Err(ConstraintViolation::EliteCount {
                found: elite,
                min: c.elite_min,
                max: c.elite_max,
            });
        }
        let weak = team.iter().filter(|p| self.scorer.category(p) == Category::Weak).count();
        if weak < c.weak_min || weak > c.weak_max {
            return Err(ConstraintViolation::WeakCount {
                found: weak,
                min: c.weak_min,
                max: c.weak_max,
            });
        }
        let leadership: f64 = team.iter().map(|p| p.leadership).sum();
        if leadership < c.leadership_min || leadership > c.leadership_max {
            return Err(ConstraintViolation::LeadershipSum {
                found: leadership,
                min: c.leadership_min,
                max: c.leadership_max,
            });
        }
        let individuality: f64 = team.iter().map(|p| p.individuality).sum();
        if individuality < c.individuality_min || individuality > c.individuality_max {
            return Err(ConstraintViolation::IndividualitySum {
                found: individuality,
                min: c.individuality_min,
                max: c.individuality_max,
            });
        }
        let condition: f64 = team.iter().map(|p| p.condition).sum();
        if condition < c.condition_min {
            return Err(ConstraintViolation::ConditionSum {
                found: condition,
                min: c.condition_min,
            });
        }
        Ok(())
    }

    /// Line-composition checks on an assignment. A partial assignment is a
    /// violation in its own right; a side that cannot cover the composition
    /// must never reach scoring.
    pub fn validate_assignment(&self, assignment: &Assignment) -> Result<(), ConstraintViolation> {
        if !assignment.is_complete() {
            return Err(ConstraintViolation::IncompleteAssignment {
                unassigned: assignment.unassigned.clone(),
            });
        }

        let groups = assignment.by_position();
        for position in Position::ALL {
            if position == Position::Goalkeeper {
                continue;
            }
            let weak = groups[position.index()]
                .iter()
                .filter(|s| s.score <= self.lines.weak_position_threshold)
                .count();
            if weak > 1 {
                return Err(ConstraintViolation::WeakPositionGroup { position, count: weak });
            }
        }

        let defense: f64 =
            groups[Position::Defender.index()].iter().map(|s| s.score).sum();
        if !groups[Position::Defender.index()].is_empty() && defense < self.lines.min_defense_total
        {
            return Err(ConstraintViolation::DefenseBelowMinimum {
                total: defense,
                min: self.lines.min_defense_total,
            });
        }

        let midfield: f64 =
            groups[Position::Midfielder.index()].iter().map(|s| s.score).sum();
        if !groups[Position::Midfielder.index()].is_empty()
            && midfield < self.lines.min_midfield_total
        {
            return Err(ConstraintViolation::MidfieldBelowMinimum {
                total: midfield,
                min: self.lines.min_midfield_total,
            });
        }

        Ok(())
    }
}
