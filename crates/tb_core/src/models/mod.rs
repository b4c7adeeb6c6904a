//! Core data types: players, positions, skill categories.

pub mod player;

pub use player::{Category, Player, Position};

/// Players per side.
pub const TEAM_SIZE: usize = 7;

/// Players a generation request must select (two full sides).
pub const POOL_SIZE: usize = 2 * TEAM_SIZE;
