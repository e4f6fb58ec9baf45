//! Random matchmaking, reads and request validation.

use lexibluff::domain::MatchState;
use lexibluff::repos::{games, players};
use lexibluff::{AppError, ErrorCode};

use crate::common::{assert_code, test_engine};
use crate::support::{seed_game, seed_player, seed_players};

#[tokio::test]
async fn first_request_opens_waiting_match() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let p1 = seed_player(state.db()).await?;

    let view = engine.request_match(game, p1, None).await?;

    assert_eq!(view.state, MatchState::Waiting);
    assert_eq!(view.players, vec![p1]);
    assert!(view.invited.is_empty());
    assert!(view.started_at.is_none());
    Ok(())
}

#[tokio::test]
async fn filling_last_seat_starts_match() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 3, 5).await?;
    let ids = seed_players(state.db(), 3).await?;

    let first = engine.request_match(game, ids[0], None).await?;
    let second = engine.request_match(game, ids[1], None).await?;
    assert_eq!(second.id, first.id);
    assert_eq!(second.state, MatchState::Waiting);

    let third = engine.request_match(game, ids[2], None).await?;
    assert_eq!(third.id, first.id);
    assert_eq!(third.state, MatchState::Started);
    assert_eq!(third.players, ids);
    assert!(third.started_at.is_some());
    assert!(third.version > first.version);
    Ok(())
}

#[tokio::test]
async fn random_join_picks_oldest_waiting_match() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 3, 5).await?;
    let ids = seed_players(state.db(), 2).await?;

    // A player never joins the same match twice, so a repeat request opens a second one
    let older = engine.request_match(game, ids[0], None).await?;
    let newer = engine.request_match(game, ids[0], None).await?;
    assert_ne!(older.id, newer.id);

    let joined = engine.request_match(game, ids[1], None).await?;
    assert_eq!(joined.id, older.id);
    assert_eq!(joined.players, vec![ids[0], ids[1]]);
    Ok(())
}

#[tokio::test]
async fn matches_of_other_games_are_not_joined() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game_a = seed_game(state.db(), 2, 3).await?;
    let game_b = seed_game(state.db(), 2, 3).await?;
    let ids = seed_players(state.db(), 2).await?;

    let a = engine.request_match(game_a, ids[0], None).await?;
    let b = engine.request_match(game_b, ids[1], None).await?;

    assert_ne!(a.id, b.id);
    assert_eq!(b.state, MatchState::Waiting);
    Ok(())
}

#[tokio::test]
async fn unknown_or_inactive_game_is_not_found() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let player = seed_player(state.db()).await?;

    assert_code(
        engine.request_match(9_999, player, None).await,
        ErrorCode::GameNotFound,
    );

    let game = seed_game(state.db(), 2, 4).await?;
    games::set_active(state.db(), game, false).await?;
    assert_code(
        engine.request_match(game, player, None).await,
        ErrorCode::GameNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn unknown_or_inactive_requester_is_not_found() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;

    assert_code(
        engine.request_match(game, 9_999, None).await,
        ErrorCode::PlayerNotFound,
    );

    let player = seed_player(state.db()).await?;
    players::set_active(state.db(), player, false).await?;
    assert_code(
        engine.request_match(game, player, None).await,
        ErrorCode::PlayerNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn get_match_reports_roster_and_unknown_ids() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 2).await?;
    engine.request_match(game, ids[0], None).await?;
    let started = engine.request_match(game, ids[1], None).await?;

    let loaded = engine.get_match(started.id).await?;
    assert_eq!(loaded, started);

    assert_code(engine.get_match(started.id + 100).await, ErrorCode::MatchNotFound);
    Ok(())
}

#[tokio::test]
async fn list_matches_is_newest_first_and_paginated() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let player = seed_player(state.db()).await?;

    let mut opened = Vec::new();
    for _ in 0..3 {
        opened.push(engine.request_match(game, player, None).await?.id);
    }

    let all = engine.list_matches_for_player(game, player, 10, 0).await?;
    let ids: Vec<i64> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![opened[2], opened[1], opened[0]]);

    let page = engine.list_matches_for_player(game, player, 1, 1).await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, opened[1]);

    let stranger = seed_player(state.db()).await?;
    assert!(engine
        .list_matches_for_player(game, stranger, 10, 0)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn match_view_serializes_states_and_timestamps() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let player = seed_player(state.db()).await?;
    let view = engine.request_match(game, player, None).await?;

    let json = serde_json::to_value(&view).map_err(|e| AppError::internal(e.to_string()))?;
    assert_eq!(json["state"], "WAITING");
    assert!(json["created_at"].as_str().is_some_and(|s| s.contains('T')));
    assert!(json["started_at"].is_null());
    Ok(())
}
