// Manual runner for the balancing engine.
// Run with: cargo run --bin generate_teams [registry.json] [seed]

use anyhow::{bail, Context, Result};
use tb_core::{
    default_registry, generate_teams_json, BalanceConfig, HistoryStore, PlayerRegistry,
    TeamService, SCHEMA_VERSION,
};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let registry = match args.next() {
        Some(path) => PlayerRegistry::from_file(&path)
            .with_context(|| format!("loading registry from {}", path))?,
        None => default_registry().clone(),
    };
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().context("seed must be an unsigned integer")?,
        None => 42,
    };

    let config = BalanceConfig::default();
    let pool_size = 2 * config.composition.total();
    if registry.len() < pool_size {
        bail!("registry holds {} players, {} needed", registry.len(), pool_size);
    }
    let selected: Vec<String> = registry
        .players()
        .iter()
        .take(pool_size)
        .map(|p| p.name.clone())
        .collect();

    let store = HistoryStore::new("history.json", config.max_history);
    let service = TeamService::new(registry, config, store)?;

    let request = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "seed": seed,
        "selected_players": selected,
    });
    match generate_teams_json(&service, &request.to_string()) {
        Ok(response) => {
            println!("{}", response);
            Ok(())
        }
        Err(err) => bail!("generation failed: {}", err),
    }
}
