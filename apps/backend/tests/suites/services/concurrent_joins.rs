//! Random joins issued concurrently.

use std::collections::HashSet;
use std::sync::Arc;

use lexibluff::domain::MatchState;
use lexibluff::{AppError, Engine};
use serial_test::serial;
use tokio::sync::Barrier;

use crate::common::{pooled_test_engine, test_engine};
use crate::support::{seed_game, seed_players};

/// Release one random request per player at the same instant; returns the
/// distinct match ids they landed in.
async fn race_random_requests(
    engine: &Engine,
    game: i64,
    players: &[i64],
) -> Result<HashSet<i64>, AppError> {
    let barrier = Arc::new(Barrier::new(players.len()));
    let mut handles = Vec::with_capacity(players.len());
    for &player in players {
        let engine = engine.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            engine.request_match(game, player, None).await
        }));
    }

    let mut match_ids = HashSet::new();
    for handle in handles {
        let view = handle
            .await
            .map_err(|e| AppError::internal(format!("join task panicked: {e}")))??;
        match_ids.insert(view.id);
    }
    Ok(match_ids)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_random_joins_start_exactly_one_match() -> Result<(), AppError> {
    const N: usize = 4;

    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), N as i16, N as i16 + 1).await?;
    let ids = seed_players(state.db(), N).await?;

    let match_ids = race_random_requests(&engine, game, &ids).await?;
    assert_eq!(match_ids.len(), 1, "all requests must land in one match");

    let match_id = *match_ids.iter().next().expect("one match id");
    let view = engine.get_match(match_id).await?;
    assert_eq!(view.state, MatchState::Started);
    assert_eq!(view.players.len(), N);

    let distinct: HashSet<i64> = view.players.iter().copied().collect();
    let expected: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(distinct, expected);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_beyond_capacity_open_second_match() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 3).await?;
    let ids = seed_players(state.db(), 3).await?;

    let mut handles = Vec::new();
    for &player in &ids {
        let engine = engine.clone();
        handles.push(tokio::spawn(
            async move { engine.request_match(game, player, None).await },
        ));
    }

    let mut views = Vec::new();
    for handle in handles {
        views.push(
            handle
                .await
                .map_err(|e| AppError::internal(format!("join task panicked: {e}")))??,
        );
    }

    let mut started = HashSet::new();
    let mut waiting = HashSet::new();
    for view in &views {
        let current = engine.get_match(view.id).await?;
        match current.state {
            MatchState::Started => {
                assert_eq!(current.players.len(), 2);
                started.insert(current.id);
            }
            MatchState::Waiting => {
                assert_eq!(current.players.len(), 1);
                waiting.insert(current.id);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
    assert_eq!(started.len(), 1);
    assert_eq!(waiting.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn pooled_first_requests_share_one_match() -> Result<(), AppError> {
    let Some((engine, state)) = pooled_test_engine().await? else {
        return Ok(());
    };

    for round in 0..20 {
        let game = seed_game(state.db(), 2, 3).await?;
        let ids = seed_players(state.db(), 2).await?;

        let match_ids = race_random_requests(&engine, game, &ids).await?;
        assert_eq!(match_ids.len(), 1, "round {round} split into {match_ids:?}");

        let match_id = *match_ids.iter().next().expect("one match id");
        let view = engine.get_match(match_id).await?;
        assert_eq!(view.state, MatchState::Started, "round {round}");
        assert_eq!(view.players.len(), 2);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn pooled_crowd_fills_one_match() -> Result<(), AppError> {
    const N: usize = 4;

    let Some((engine, state)) = pooled_test_engine().await? else {
        return Ok(());
    };
    let game = seed_game(state.db(), N as i16, N as i16 + 1).await?;
    let ids = seed_players(state.db(), N).await?;

    let match_ids = race_random_requests(&engine, game, &ids).await?;
    assert_eq!(match_ids.len(), 1);

    let match_id = *match_ids.iter().next().expect("one match id");
    let view = engine.get_match(match_id).await?;
    assert_eq!(view.state, MatchState::Started);
    let joined: HashSet<i64> = view.players.iter().copied().collect();
    assert_eq!(joined, ids.iter().copied().collect::<HashSet<i64>>());
    Ok(())
}
