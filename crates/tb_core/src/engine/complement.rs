//! Line-balance analysis: net bonus/penalty plus per-line diagnostics.

use crate::config::{BalanceConfig, LineRules};
use crate::engine::assign::Assignment;
use crate::models::Position;
use serde::Serialize;

/// Team line grouping. The goalkeeper line appears in diagnostics but is
/// excluded from all balance bonuses and penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl Line {
    pub const ALL: [Line; 4] = [Line::Goalkeeper, Line::Defense, Line::Midfield, Line::Attack];

    pub fn of(position: Position) -> Line {
        match position {
            Position::Goalkeeper => Line::Goalkeeper,
            Position::Defender => Line::Defense,
            Position::Midfielder => Line::Midfield,
            Position::Forward => Line::Attack,
        }
    }
}

/// Diagnostics for one non-empty line.
#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    pub line: Line,
    pub total: f64,
    pub mean: f64,
    /// Members strictly below the weak threshold at their assigned position.
    pub weak_count: usize,
    /// (name, per-position score) pairs.
    pub members: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplementarityReport {
    /// Bonus minus penalty.
    pub net: f64,
    pub lines: Vec<LineReport>,
}

/// Computes the line-balance component of a team score.
#[derive(Debug, Clone)]
pub struct ComplementarityAnalyzer {
    lines: LineRules,
    weak_threshold: f64,
}

impl ComplementarityAnalyzer {
    pub fn new(config: &BalanceConfig) -> Self {
        Self { lines: config.lines.clone(), weak_threshold: config.weak_threshold }
    }

    pub fn analyze(&self, assignment: &Assignment) -> ComplementarityReport {
        let groups = assignment.by_position();
        let mut bonus = 0.0;
        let mut penalty = 0.0;

        // Stacked weakness within one position group is penalized hard.
        for position in Position::ALL {
            if position == Position::Goalkeeper {
                continue;
            }
            let weak = groups[position.index()]
                .iter()
                .filter(|s| s.score <= self.lines.weak_position_threshold)
                .count();
            if weak > 1 {
                penalty += 20.0 * weak as f64;
            }
        }

        let mut reports = Vec::new();
        for line in Line::ALL {
            let members: Vec<(String, f64)> = assignment
                .slots
                .iter()
                .filter(|s| Line::of(s.position) == line)
                .map(|s| (s.name.clone(), s.score))
                .collect();
            if members.is_empty() {
                continue;
            }

            let total: f64 = members.iter().map(|(_, s)| s).sum();
            let mean = total / members.len() as f64;
            let weak_count =
                members.iter().filter(|(_, s)| *s < self.weak_threshold).count();

            if line != Line::Goalkeeper {
                if weak_count > self.lines.max_weak_per_line {
                    penalty += 3.0 * (weak_count - self.lines.max_weak_per_line) as f64;
                }
                let minimum = match line {
                    Line::Defense => Some(self.lines.min_defense_total),
                    Line::Midfield => Some(self.lines.min_midfield_total),
                    _ => None,
                };
                if let Some(minimum) = minimum {
                    if total < minimum {
                        penalty += 0.5 * (minimum - total);
                    }
                }
                if members.len() >= 2 {
                    let max = members.iter().map(|(_, s)| *s).fold(f64::MIN, f64::max);
                    let min = members.iter().map(|(_, s)| *s).fold(f64::MAX, f64::min);
                    let spread = max - min;
                    if (2.0..=5.0).contains(&spread) {
                        bonus += self.lines.balanced_line_bonus;
                    }
                }
            }

            reports.push(LineReport { line, total, mean, weak_count, members });
        }

        ComplementarityReport { net: bonus - penalty, lines: reports }
    }
}
