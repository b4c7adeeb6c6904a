//! Transport-agnostic JSON API.

pub mod json_api;

pub use json_api::{
    clear_history_json, generate_teams_json, history_json, list_players_json, GenerateRequest,
    GenerateResponse, TeamService,
};
