//! JSON request/response functions wrapping the engine.
//!
//! These are the process boundary: requests come in as JSON strings, results
//! go out the same way, and every failure is a descriptive `Err(String)`
//! rather than a panic. Any HTTP layer stays outside this crate.

use crate::config::BalanceConfig;
use crate::data::PlayerRegistry;
use crate::engine::complement::LineReport;
use crate::engine::scoring::PlayerScorer;
use crate::engine::search::{TeamEvaluation, TeamSearch};
use crate::error::Result;
use crate::models::{Category, Player, Position};
use crate::save::HistoryStore;
use serde::{Deserialize, Serialize};

/// Everything a request needs, built once at startup and injected.
pub struct TeamService {
    registry: PlayerRegistry,
    config: BalanceConfig,
    store: HistoryStore,
    search: TeamSearch,
    scorer: PlayerScorer,
}

impl TeamService {
    pub fn new(
        registry: PlayerRegistry,
        config: BalanceConfig,
        store: HistoryStore,
    ) -> Result<Self> {
        let search =
            TeamSearch::new(&config, registry.synergies(), registry.anti_synergies())?;
        let scorer = PlayerScorer::new(&config);
        Ok(Self { registry, config, store, search, scorer })
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub schema_version: u8,
    /// Fixed seed for reproducible pairings; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub selected_players: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerRow {
    pub name: String,
    pub position: Position,
    pub score: f64,
    pub priority: usize,
    pub global_score: f64,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct TeamReport {
    pub score: f64,
    /// Score without the repetition penalty.
    pub score_real: f64,
    pub score_base: f64,
    pub synergy: f64,
    pub complementarity: f64,
    pub anti_synergy: f64,
    pub repetition: f64,
    pub elite_count: usize,
    pub moderate_count: usize,
    pub weak_count: usize,
    pub leadership: f64,
    pub individuality: f64,
    pub condition: f64,
    pub lines: Vec<LineReport>,
    pub players: Vec<PlayerRow>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub team_a: TeamReport,
    pub team_b: TeamReport,
    pub valid_attempts: u32,
    /// False when the result was computed but could not be persisted.
    pub history_saved: bool,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl TeamReport {
    fn from_evaluation(eval: &TeamEvaluation) -> Self {
        Self {
            score: round2(eval.score),
            score_real: round2(eval.score + eval.repetition_penalty),
            score_base: round2(eval.base_score),
            synergy: round2(eval.synergy),
            complementarity: round2(eval.complementarity),
            anti_synergy: round2(eval.anti_synergy),
            repetition: round2(eval.repetition_penalty),
            elite_count: eval.elite_count,
            moderate_count: eval.moderate_count,
            weak_count: eval.weak_count,
            leadership: eval.leadership,
            individuality: eval.individuality,
            condition: eval.condition,
            lines: eval.lines.clone(),
            players: eval
                .players
                .iter()
                .map(|p| PlayerRow {
                    name: p.name.clone(),
                    position: p.position,
                    score: round1(p.score),
                    priority: p.priority,
                    global_score: round1(p.global_score),
                    category: p.category,
                })
                .collect(),
        }
    }
}

/// Generate a balanced pairing for exactly one pool of selected players.
///
/// Client errors (wrong count, unknown names, bad schema) leave the history
/// untouched. A history write failure is reported in the response but does
/// not discard the computed pairing.
pub fn generate_teams_json(
    service: &TeamService,
    request_json: &str,
) -> std::result::Result<String, String> {
    let request: GenerateRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid JSON request: {}", e))?;
    if request.schema_version != crate::SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let expected = 2 * service.config.composition.total();
    if request.selected_players.len() != expected {
        return Err(format!(
            "{} players selected, {} required",
            request.selected_players.len(),
            expected
        ));
    }
    let mut pool: Vec<Player> = Vec::with_capacity(expected);
    for name in &request.selected_players {
        match service.registry.get(name) {
            Some(player) => pool.push(player.clone()),
            None => return Err(format!("Unknown player: {}", name)),
        }
    }

    let seed = request.seed.unwrap_or_else(rand::random);
    let history = service.store.load();
    let outcome = service.search.search(&pool, &history, seed).map_err(|e| e.to_string())?;

    let history_saved = match service
        .store
        .append_match(outcome.team_a.names(), outcome.team_b.names())
    {
        Ok(()) => true,
        Err(err) => {
            log::warn!("history write failed: {}", err);
            false
        }
    };

    let response = GenerateResponse {
        success: true,
        team_a: TeamReport::from_evaluation(&outcome.team_a),
        team_b: TeamReport::from_evaluation(&outcome.team_b),
        valid_attempts: outcome.valid_attempts,
        history_saved,
    };
    serde_json::to_string(&response).map_err(|e| format!("Response serialization failed: {}", e))
}

#[derive(Debug, Serialize)]
struct PlayerSummary {
    name: String,
    global_score: f64,
    category: Category,
    leadership: f64,
    individuality: f64,
    condition: f64,
}

/// Summarize every registered player.
pub fn list_players_json(service: &TeamService) -> std::result::Result<String, String> {
    let players: Vec<PlayerSummary> = service
        .registry
        .players()
        .iter()
        .map(|p| PlayerSummary {
            name: p.name.clone(),
            global_score: round1(service.scorer.global_score(p)),
            category: service.scorer.category(p),
            leadership: p.leadership,
            individuality: p.individuality,
            condition: p.condition,
        })
        .collect();
    serde_json::to_string(&serde_json::json!({ "players": players }))
        .map_err(|e| format!("Response serialization failed: {}", e))
}

/// The bounded history plus its derived match count.
pub fn history_json(service: &TeamService) -> std::result::Result<String, String> {
    let history = service.store.load();
    let response = serde_json::json!({
        "history": history,
        "total_matches": history.len() / 2,
        "max_history": service.store.max_history(),
    });
    serde_json::to_string(&response).map_err(|e| format!("Response serialization failed: {}", e))
}

/// Reset the persisted history.
pub fn clear_history_json(service: &TeamService) -> std::result::Result<String, String> {
    service.store.clear().map_err(|e| format!("History clear failed: {}", e))?;
    Ok(serde_json::json!({ "success": true }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn test_registry_json() -> String {
        // 2 elite, 2 weak, 10 moderate versatile players; every split that
        // puts one elite and one weak on each side validates.
        let mut players = Vec::new();
        let mut push = |name: &str, level: f64, leadership: f64| {
            players.push(serde_json::json!({
                "name": name,
                "positions": ["goalkeeper", "defender", "midfielder", "forward"],
                "levels": [level, level, level, level],
                "leadership": leadership,
                "individuality": 4.0,
                "condition": 5.0,
            }));
        };
        push("Elite A", 10.0, 3.0);
        push("Elite B", 10.0, 3.0);
        push("Weak A", 3.0, 2.0);
        push("Weak B", 3.0, 2.0);
        for i in 0..10 {
            push(&format!("Mid {i}"), 7.0, 2.0);
        }
        serde_json::json!({
            "players": players,
            "synergies": [["Elite A", "Mid 0"]],
            "anti_synergies": [],
        })
        .to_string()
    }

    fn service_in(dir: &TempDir) -> TeamService {
        let registry = PlayerRegistry::from_str(&test_registry_json()).unwrap();
        let config = BalanceConfig::default();
        let store = HistoryStore::new(dir.path().join("history.json"), config.max_history);
        TeamService::new(registry, config, store).unwrap()
    }

    fn all_names(service: &TeamService) -> Vec<String> {
        service.registry().players().iter().map(|p| p.name.clone()).collect()
    }

    fn generate(service: &TeamService, seed: u64) -> Value {
        let request = serde_json::json!({
            "schema_version": 1,
            "seed": seed,
            "selected_players": all_names(service),
        });
        let response = generate_teams_json(service, &request.to_string()).unwrap();
        serde_json::from_str(&response).unwrap()
    }

    #[test]
    fn generate_returns_two_full_sides() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let response = generate(&service, 42);
        assert_eq!(response["success"], true);
        assert!(response["valid_attempts"].as_u64().unwrap() > 0);
        assert_eq!(response["team_a"]["players"].as_array().unwrap().len(), 7);
        assert_eq!(response["team_b"]["players"].as_array().unwrap().len(), 7);
        assert_eq!(response["history_saved"], true);
    }

    #[test]
    fn generate_appends_both_sides_to_history() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let response = generate(&service, 42);
        let history = service.store().load();
        assert_eq!(history.len(), 2);
        let names = |team: &Value| -> Vec<String> {
            team["players"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["name"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(history[0], names(&response["team_a"]));
        assert_eq!(history[1], names(&response["team_b"]));

        generate(&service, 43);
        assert_eq!(service.store().load().len(), 4);
    }

    #[test]
    fn history_is_bounded_by_the_cap() {
        let dir = TempDir::new().unwrap();
        let registry = PlayerRegistry::from_str(&test_registry_json()).unwrap();
        let config = BalanceConfig { max_history: 1, ..BalanceConfig::default() };
        let store = HistoryStore::new(dir.path().join("history.json"), config.max_history);
        let service = TeamService::new(registry, config, store).unwrap();
        generate(&service, 1);
        generate(&service, 2);
        assert_eq!(service.store().load().len(), 2);
    }

    #[test]
    fn wrong_player_count_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let request = serde_json::json!({
            "schema_version": 1,
            "selected_players": ["Elite A", "Elite B"],
        });
        let err = generate_teams_json(&service, &request.to_string()).unwrap_err();
        assert!(err.contains("14 required"), "{err}");
        assert!(service.store().load().is_empty());
    }

    #[test]
    fn unknown_player_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let mut names = all_names(&service);
        names[0] = "Nobody".to_string();
        let request = serde_json::json!({
            "schema_version": 1,
            "selected_players": names,
        });
        let err = generate_teams_json(&service, &request.to_string()).unwrap_err();
        assert!(err.contains("Nobody"), "{err}");
        assert!(service.store().load().is_empty());
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let request = serde_json::json!({
            "schema_version": 9,
            "selected_players": all_names(&service),
        });
        assert!(generate_teams_json(&service, &request.to_string()).is_err());
    }

    #[test]
    fn list_players_reports_scores_and_categories() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let response: Value =
            serde_json::from_str(&list_players_json(&service).unwrap()).unwrap();
        let players = response["players"].as_array().unwrap();
        assert_eq!(players.len(), 14);
        let elite = players.iter().find(|p| p["name"] == "Elite A").unwrap();
        assert_eq!(elite["category"], "elite");
        // level 10 + 3*0.3 + 4*0.15 + 5*0.2 = 12.5 at every position
        assert_eq!(elite["global_score"].as_f64().unwrap(), 12.5);
    }

    #[test]
    fn history_endpoints_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        generate(&service, 7);
        let response: Value = serde_json::from_str(&history_json(&service).unwrap()).unwrap();
        assert_eq!(response["total_matches"], 1);
        assert_eq!(response["max_history"], 5);
        assert_eq!(response["history"].as_array().unwrap().len(), 2);

        let cleared: Value =
            serde_json::from_str(&clear_history_json(&service).unwrap()).unwrap();
        assert_eq!(cleared["success"], true);
        assert!(service.store().load().is_empty());
    }

    #[test]
    fn synergy_component_reflects_the_configured_bonus() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let response = generate(&service, 42);
        for team in ["team_a", "team_b"] {
            let names: Vec<&str> = response[team]["players"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["name"].as_str().unwrap())
                .collect();
            let expected = if names.contains(&"Elite A") && names.contains(&"Mid 0") {
                2.0
            } else {
                0.0
            };
            assert_eq!(response[team]["synergy"].as_f64().unwrap(), expected);
        }
    }
}
