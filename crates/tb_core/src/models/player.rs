use serde::{Deserialize, Serialize};
use std::fmt;

/// Positions of the fixed 7-a-side lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    pub const COUNT: usize = Self::ALL.len();

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }

    /// Dense index for capacity tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill tier derived on demand from a player's global score; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Elite,
    Moderate,
    Weak,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Elite => "elite",
            Category::Moderate => "moderate",
            Category::Weak => "weak",
        }
    }
}

/// A registered player. Immutable once loaded from the registry.
///
/// `positions` lists the playable positions in preference order; `levels` is
/// the parallel proficiency list (one entry per position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub positions: Vec<Position>,
    pub levels: Vec<f64>,
    pub leadership: f64,
    pub individuality: f64,
    pub condition: f64,
}

impl Player {
    /// 0-based rank of `position` in the preference list, if playable.
    pub fn priority_rank(&self, position: Position) -> Option<usize> {
        self.positions.iter().position(|p| *p == position)
    }

    /// Proficiency at `position`, if playable.
    pub fn level_for(&self, position: Position) -> Option<f64> {
        self.priority_rank(position).and_then(|idx| self.levels.get(idx).copied())
    }
}
