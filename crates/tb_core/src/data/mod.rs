//! Player registry loading and validation.
//!
//! The registry is static data: player records plus the global synergy and
//! anti-synergy pair lists. It is loaded and validated once at startup and
//! injected read-only into the engine.

use crate::models::Player;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid registry: {0}")]
    Invalid(String),
}

/// Unordered pair of player names. Serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair(String, String);

impl PlayerPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self(first.into(), second.into())
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    players: Vec<Player>,
    #[serde(default)]
    synergies: Vec<PlayerPair>,
    #[serde(default)]
    anti_synergies: Vec<PlayerPair>,
}

/// Immutable collection of registered players plus chemistry pair lists.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    synergies: Vec<PlayerPair>,
    anti_synergies: Vec<PlayerPair>,
}

impl PlayerRegistry {
    pub fn from_str(json: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        Self::validate(file)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let raw = fs::read_to_string(path)?;
        Self::from_str(&raw)
    }

    fn validate(file: RegistryFile) -> Result<Self, RegistryError> {
        let mut names = HashSet::new();
        for player in &file.players {
            if player.name.trim().is_empty() {
                return Err(RegistryError::Invalid("player with empty name".to_string()));
            }
            if !names.insert(player.name.as_str()) {
                return Err(RegistryError::Invalid(format!(
                    "duplicate player name: {}",
                    player.name
                )));
            }
            if player.positions.is_empty() {
                return Err(RegistryError::Invalid(format!(
                    "player {} has no positions",
                    player.name
                )));
            }
            if player.positions.len() != player.levels.len() {
                return Err(RegistryError::Invalid(format!(
                    "player {}: {} positions but {} levels",
                    player.name,
                    player.positions.len(),
                    player.levels.len()
                )));
            }
        }
        for pair in file.synergies.iter().chain(&file.anti_synergies) {
            for member in [pair.first(), pair.second()] {
                if !names.contains(member) {
                    return Err(RegistryError::Invalid(format!(
                        "pair references unknown player: {}",
                        member
                    )));
                }
            }
        }
        Ok(Self {
            players: file.players,
            synergies: file.synergies,
            anti_synergies: file.anti_synergies,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Players in file order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn synergies(&self) -> &[PlayerPair] {
        &self.synergies
    }

    pub fn anti_synergies(&self) -> &[PlayerPair] {
        &self.anti_synergies
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Default roster embedded at compile time; no file I/O needed for demos.
pub const DEFAULT_REGISTRY_JSON: &str = include_str!("../../data/default_players.json");

static DEFAULT_REGISTRY: Lazy<PlayerRegistry> = Lazy::new(|| {
    PlayerRegistry::from_str(DEFAULT_REGISTRY_JSON).expect("embedded registry is valid")
});

pub fn default_registry() -> &'static PlayerRegistry {
    &DEFAULT_REGISTRY
}
