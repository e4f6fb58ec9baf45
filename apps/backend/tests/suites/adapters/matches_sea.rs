//! Match rows: versioned updates and candidate search.

use lexibluff::domain::MatchState;
use lexibluff::repos::matches::{self, MatchChanges};
use lexibluff::repos::memberships;
use lexibluff::{AppError, ErrorCode};

use crate::common::test_state;
use crate::support::{seed_game, seed_players};

#[tokio::test]
async fn stale_version_is_optimistic_lock_conflict() -> Result<(), AppError> {
    let state = test_state().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let m = matches::create_match(state.db(), game, 1, 1).await?;
    assert_eq!(m.version, 1);
    assert_eq!(m.state, MatchState::Waiting);

    let updated = matches::update_match(
        state.db(),
        m.id,
        m.version,
        MatchChanges {
            player_count: Some(2),
            reserved_count: Some(2),
            state: Some(MatchState::Started),
        },
    )
    .await?;
    assert_eq!(updated.version, 2);
    assert_eq!(updated.player_count, 2);
    assert!(updated.started_at.is_some());

    // The loser of the race still holds version 1
    let err: AppError = matches::update_match(
        state.db(),
        m.id,
        m.version,
        MatchChanges {
            player_count: Some(2),
            ..Default::default()
        },
    )
    .await
    .expect_err("stale version must not apply")
    .into();
    assert_eq!(err.code(), ErrorCode::OptimisticLock);
    assert!(err.is_retryable_conflict());

    let current = matches::require_match(state.db(), m.id).await?;
    assert_eq!(current.version, 2);
    Ok(())
}

#[tokio::test]
async fn update_of_missing_match_is_not_found() -> Result<(), AppError> {
    let state = test_state().await?;

    let err: AppError = matches::update_match(state.db(), 4_242, 1, MatchChanges::default())
        .await
        .expect_err("no such match")
        .into();
    assert!(matches!(err, AppError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn random_candidate_skips_full_and_own_matches() -> Result<(), AppError> {
    let state = test_state().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 3).await?;

    let full = matches::create_match(state.db(), game, 2, 2).await?;
    memberships::add_joined(state.db(), full.id, ids[0], 1).await?;
    memberships::add_joined(state.db(), full.id, ids[1], 2).await?;

    let own = matches::create_match(state.db(), game, 1, 1).await?;
    memberships::add_joined(state.db(), own.id, ids[2], 1).await?;

    assert!(matches::find_random_candidate(state.db(), game, ids[2], 2)
        .await?
        .is_none());

    let found = matches::find_random_candidate(state.db(), game, ids[0], 2).await?;
    assert_eq!(found.map(|m| m.id), Some(own.id));
    Ok(())
}
