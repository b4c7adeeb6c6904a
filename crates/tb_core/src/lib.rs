//! # tb_core
//!
//! Deterministic 7-a-side team balancing engine.
//!
//! Given a pool of 14 registered players, the engine searches randomized
//! partitions for the pair of sides with the smallest combined imbalance,
//! subject to roster constraints (elite/weak counts, attribute sums) and
//! line-completeness rules. The same seed always yields the same pairing.
//!
//! The public surface is a JSON-string API ([`api::generate_teams_json`] and
//! friends) around an injected [`api::TeamService`]; no global state, no I/O
//! outside the explicit [`save::HistoryStore`].

pub mod api;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;

pub use api::{
    clear_history_json, generate_teams_json, history_json, list_players_json, TeamService,
};
pub use config::BalanceConfig;
pub use data::{default_registry, PlayerRegistry};
pub use engine::assign::Assignment;
pub use engine::search::{SearchOutcome, TeamSearch};
pub use error::{BalanceError, Result};
pub use models::{Category, Player, Position};
pub use save::HistoryStore;

/// Crate version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON API schema version. Bump on breaking request/response changes.
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> TeamService {
        let config = BalanceConfig::default();
        let store = HistoryStore::new(dir.path().join("history.json"), config.max_history);
        TeamService::new(default_registry().clone(), config, store).unwrap()
    }

    fn request_for(service: &TeamService, seed: u64) -> String {
        let names: Vec<String> = service
            .registry()
            .players()
            .iter()
            .take(14)
            .map(|p| p.name.clone())
            .collect();
        serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "seed": seed,
            "selected_players": names,
        })
        .to_string()
    }

    #[test]
    fn embedded_registry_generates_end_to_end() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let raw = generate_teams_json(&service, &request_for(&service, 42)).unwrap();
        let response: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["team_a"]["players"].as_array().unwrap().len(), 7);
        assert_eq!(response["team_b"]["players"].as_array().unwrap().len(), 7);
        for team in ["team_a", "team_b"] {
            let positions: Vec<&str> = response[team]["players"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["position"].as_str().unwrap())
                .collect();
            assert_eq!(positions.iter().filter(|p| **p == "goalkeeper").count(), 1);
            assert_eq!(positions.iter().filter(|p| **p == "defender").count(), 2);
            assert_eq!(positions.iter().filter(|p| **p == "midfielder").count(), 3);
            assert_eq!(positions.iter().filter(|p| **p == "forward").count(), 1);
        }
    }

    #[test]
    fn same_seed_is_fully_deterministic() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        let service_a = service_in(&dir_a);
        let service_b = service_in(&dir_b);
        let first = generate_teams_json(&service_a, &request_for(&service_a, 7)).unwrap();
        let second = generate_teams_json(&service_b, &request_for(&service_b, 7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_pairings_are_penalized_on_rematch() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let request = request_for(&service, 99);
        generate_teams_json(&service, &request).unwrap();
        let rematch: Value =
            serde_json::from_str(&generate_teams_json(&service, &request).unwrap()).unwrap();
        assert!(rematch["team_a"]["repetition"].as_f64().unwrap() > 0.0);
    }
}
