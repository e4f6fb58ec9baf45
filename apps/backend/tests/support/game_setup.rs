//! Build STARTED matches ready for turn play.

use lexibluff::repos::turn_fillers::{self, TurnFiller};
use lexibluff::{AppError, AppState, Engine};

use super::factory::{seed_content, seed_game, seed_players, SeededWord};

pub struct StartedMatch {
    pub game_id: i64,
    pub match_id: i64,
    /// Join order; `players[0]` selects first
    pub players: Vec<i64>,
    pub words: Vec<SeededWord>,
}

/// Seed content, a game and `match_size` players, then random-join them all.
pub async fn start_match(
    engine: &Engine,
    state: &AppState,
    match_size: i16,
    filler_count: i16,
    words: usize,
    bluffs: usize,
) -> Result<StartedMatch, AppError> {
    let words = seed_content(state.db(), words, bluffs).await?;
    let game_id = seed_game(state.db(), match_size, filler_count).await?;
    let players = seed_players(state.db(), match_size as usize).await?;

    let mut match_id = 0;
    for &player in &players {
        match_id = engine.request_match(game_id, player, None).await?.id;
    }

    Ok(StartedMatch {
        game_id,
        match_id,
        players,
        words,
    })
}

pub fn values(a: &str, b: &str) -> Vec<String> {
    vec![a.to_string(), b.to_string()]
}

pub async fn turn_rows(state: &AppState, turn_id: i64) -> Result<Vec<TurnFiller>, AppError> {
    Ok(turn_fillers::find_by_turn(state.db(), turn_id).await?)
}

/// Canonical row of the turn.
pub async fn dictionary_row(state: &AppState, turn_id: i64) -> Result<TurnFiller, AppError> {
    turn_rows(state, turn_id)
        .await?
        .into_iter()
        .find(|r| r.is_dictionary)
        .ok_or_else(|| AppError::internal(format!("turn {turn_id} has no dictionary row")))
}
