//! Greedy position assignment for one side.

use crate::config::Composition;
use crate::engine::scoring::PlayerScorer;
use crate::models::{Player, Position};
use serde::Serialize;
use std::cmp::Ordering;

/// One player fixed to one position.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedSlot {
    pub name: String,
    pub position: Position,
    /// Per-position score of the player at the assigned position.
    pub score: f64,
    /// 0-based rank of the position in the player's preference list.
    pub priority_rank: usize,
}

/// Outcome of assigning a side to the fixed composition.
///
/// The greedy walk is an approximate matching: capacity can run out before a
/// player's viable positions come up, leaving them in `unassigned`. Callers
/// must check [`Assignment::is_complete`]; an incomplete assignment is never
/// scored silently.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub slots: Vec<AssignedSlot>,
    pub unassigned: Vec<String>,
}

impl Assignment {
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Assigned names in slot order.
    pub fn names(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.name.clone()).collect()
    }

    /// Slots grouped by assigned position, in [`Position::ALL`] order.
    pub fn by_position(&self) -> [Vec<&AssignedSlot>; Position::COUNT] {
        let mut groups: [Vec<&AssignedSlot>; Position::COUNT] = Default::default();
        for slot in &self.slots {
            groups[slot.position.index()].push(slot);
        }
        groups
    }
}

/// Assigns a side to the required positions, maximizing per-position score.
#[derive(Debug, Clone)]
pub struct PositionAssigner {
    composition: Composition,
    scorer: PlayerScorer,
}

impl PositionAssigner {
    pub fn new(composition: Composition, scorer: PlayerScorer) -> Self {
        Self { composition, scorer }
    }

    /// Greedy approximate matching: all (player, position) candidates sorted
    /// by score descending then preference rank ascending, each player taking
    /// the first position with remaining capacity.
    pub fn assign(&self, team: &[Player]) -> Assignment {
        let mut candidates: Vec<(usize, Position, f64, usize)> = Vec::new();
        for (player_idx, player) in team.iter().enumerate() {
            for (rank, &position) in player.positions.iter().enumerate() {
                let score = self.scorer.score_for_position(player, position);
                candidates.push((player_idx, position, score, rank));
            }
        }
        candidates.sort_by(|a, b| {
            b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal).then(a.3.cmp(&b.3))
        });

        let mut remaining = [0usize; Position::COUNT];
        for position in Position::ALL {
            remaining[position.index()] = self.composition.capacity(position);
        }

        let mut taken = vec![false; team.len()];
        let mut slots = Vec::with_capacity(team.len());
        for (player_idx, position, score, rank) in candidates {
            if taken[player_idx] || remaining[position.index()] == 0 {
                continue;
            }
            remaining[position.index()] -= 1;
            taken[player_idx] = true;
            slots.push(AssignedSlot {
                name: team[player_idx].name.clone(),
                position,
                score,
                priority_rank: rank,
            });
            if slots.len() == team.len() {
                break;
            }
        }

        let unassigned = team
            .iter()
            .zip(&taken)
            .filter(|(_, taken)| !**taken)
            .map(|(player, _)| player.name.clone())
            .collect();
        Assignment { slots, unassigned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;

    fn assigner() -> PositionAssigner {
        let config = BalanceConfig::default();
        PositionAssigner::new(config.composition.clone(), PlayerScorer::new(&config))
    }

    fn specialist(name: &str, position: Position, level: f64) -> Player {
        Player {
            name: name.to_string(),
            positions: vec![position],
            levels: vec![level],
            leadership: 0.0,
            individuality: 0.0,
            condition: 0.0,
        }
    }

    #[test]
    fn specialists_fill_the_composition() {
        let team = vec![
            specialist("G", Position::Goalkeeper, 8.0),
            specialist("D1", Position::Defender, 7.0),
            specialist("D2", Position::Defender, 7.5),
            specialist("M1", Position::Midfielder, 8.0),
            specialist("M2", Position::Midfielder, 6.5),
            specialist("M3", Position::Midfielder, 7.0),
            specialist("F", Position::Forward, 9.0),
        ];
        let assignment = assigner().assign(&team);
        assert!(assignment.is_complete());
        assert_eq!(assignment.slots.len(), 7);
        let groups = assignment.by_position();
        assert_eq!(groups[Position::Goalkeeper.index()].len(), 1);
        assert_eq!(groups[Position::Defender.index()].len(), 2);
        assert_eq!(groups[Position::Midfielder.index()].len(), 3);
        assert_eq!(groups[Position::Forward.index()].len(), 1);
    }

    #[test]
    fn higher_score_wins_contested_capacity() {
        let team = vec![
            specialist("Low", Position::Forward, 6.0),
            specialist("High", Position::Forward, 9.0),
        ];
        let assignment = assigner().assign(&team);
        assert_eq!(assignment.slots.len(), 1);
        assert_eq!(assignment.slots[0].name, "High");
        assert_eq!(assignment.unassigned, vec!["Low".to_string()]);
    }

    #[test]
    fn preference_rank_breaks_score_ties() {
        let player = Player {
            name: "Dual".to_string(),
            positions: vec![Position::Defender, Position::Midfielder],
            levels: vec![7.0, 7.0],
            leadership: 0.0,
            individuality: 0.0,
            condition: 0.0,
        };
        let assignment = assigner().assign(&[player]);
        assert_eq!(assignment.slots[0].position, Position::Defender);
        assert_eq!(assignment.slots[0].priority_rank, 0);
    }

    #[test]
    fn overflow_is_reported_not_dropped() {
        let team: Vec<Player> =
            (0..7).map(|i| specialist(&format!("G{i}"), Position::Goalkeeper, 8.0)).collect();
        let assignment = assigner().assign(&team);
        assert_eq!(assignment.slots.len(), 1);
        assert_eq!(assignment.unassigned.len(), 6);
        assert!(!assignment.is_complete());
    }
}
