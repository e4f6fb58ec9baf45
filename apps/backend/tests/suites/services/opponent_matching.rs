//! Opponent-targeted requests and invited seats.

use lexibluff::domain::MatchState;
use lexibluff::repos::players;
use lexibluff::{AppError, ErrorCode};

use crate::common::{assert_code, test_engine};
use crate::support::{seed_game, seed_player, seed_players};

#[tokio::test]
async fn reciprocal_request_starts_two_player_match() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 2).await?;
    let (a, b) = (ids[0], ids[1]);

    let pending = engine.request_match(game, a, Some(b)).await?;
    assert_eq!(pending.state, MatchState::Waiting);
    assert_eq!(pending.players, vec![a]);
    assert_eq!(pending.invited, vec![b]);

    let started = engine.request_match(game, b, Some(a)).await?;
    assert_eq!(started.id, pending.id);
    assert_eq!(started.state, MatchState::Started);
    assert_eq!(started.players, vec![a, b]);
    assert!(started.invited.is_empty());
    Ok(())
}

#[tokio::test]
async fn invited_seat_is_not_taken_by_random_players() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 3).await?;

    let pending = engine.request_match(game, ids[0], Some(ids[1])).await?;
    let random = engine.request_match(game, ids[2], None).await?;

    assert_ne!(random.id, pending.id);
    let pending = engine.get_match(pending.id).await?;
    assert_eq!(pending.state, MatchState::Waiting);
    assert_eq!(pending.players, vec![ids[0]]);
    Ok(())
}

#[tokio::test]
async fn opponent_request_fills_free_seat_then_invitation() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 3, 5).await?;
    let ids = seed_players(state.db(), 3).await?;
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let pending = engine.request_match(game, a, Some(b)).await?;

    // C targets A and takes the one unreserved seat
    let joined = engine.request_match(game, c, Some(a)).await?;
    assert_eq!(joined.id, pending.id);
    assert_eq!(joined.state, MatchState::Waiting);
    assert_eq!(joined.players, vec![a, c]);
    assert_eq!(joined.invited, vec![b]);

    let started = engine.request_match(game, b, Some(a)).await?;
    assert_eq!(started.id, pending.id);
    assert_eq!(started.state, MatchState::Started);
    assert_eq!(started.players, vec![a, c, b]);
    Ok(())
}

#[tokio::test]
async fn request_without_waiting_match_opens_new_one() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 3).await?;

    // A's match is full, so B's request for A opens a fresh invitation
    engine.request_match(game, ids[0], None).await?;
    let full = engine.request_match(game, ids[2], None).await?;
    assert_eq!(full.state, MatchState::Started);

    let fresh = engine.request_match(game, ids[1], Some(ids[0])).await?;
    assert_ne!(fresh.id, full.id);
    assert_eq!(fresh.players, vec![ids[1]]);
    assert_eq!(fresh.invited, vec![ids[0]]);
    Ok(())
}

#[tokio::test]
async fn self_opponent_is_rejected() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let a = seed_player(state.db()).await?;

    let err = assert_code(
        engine.request_match(game, a, Some(a)).await,
        ErrorCode::SelfOpponent,
    );
    assert!(matches!(err, AppError::Validation { .. }));
    Ok(())
}

#[tokio::test]
async fn unknown_or_inactive_opponent_is_not_found() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 2).await?;

    assert_code(
        engine.request_match(game, ids[0], Some(9_999)).await,
        ErrorCode::OpponentNotFound,
    );

    players::set_active(state.db(), ids[1], false).await?;
    assert_code(
        engine.request_match(game, ids[0], Some(ids[1])).await,
        ErrorCode::OpponentNotFound,
    );

    assert!(engine
        .list_matches_for_player(game, ids[0], 10, 0)
        .await?
        .is_empty());
    Ok(())
}
