//! Turn rows: sequence claims and selection claims.

use lexibluff::adapters::turns_sea::TurnCreate;
use lexibluff::domain::TurnState;
use lexibluff::repos::turn_fillers::{self, FillerSource};
use lexibluff::repos::{matches, turns};
use lexibluff::{AppError, ErrorCode};

use crate::common::test_state;
use crate::support::{seed_content, seed_game, seed_player};

async fn seeded_turn_create(state: &lexibluff::AppState) -> Result<TurnCreate, AppError> {
    let words = seed_content(state.db(), 1, 2).await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let selector = seed_player(state.db()).await?;
    let m = matches::create_match(state.db(), game, 1, 1).await?;
    Ok(TurnCreate {
        match_id: m.id,
        seq: 1,
        word_id: words[0].word_id,
        definition_template_id: words[0].template_id,
        selector_id: selector,
    })
}

#[tokio::test]
async fn duplicate_sequence_is_turn_already_created() -> Result<(), AppError> {
    let state = test_state().await?;
    let dto = seeded_turn_create(&state).await?;

    let first = turns::create_turn(state.db(), dto).await?;
    assert_eq!(first.state, TurnState::Supplying);
    assert_eq!(turns::next_seq(state.db(), dto.match_id).await?, 2);

    let err: AppError = turns::create_turn(state.db(), dto)
        .await
        .expect_err("seq is unique per match")
        .into();
    assert_eq!(err.code(), ErrorCode::TurnAlreadyCreated);
    assert!(err.is_retryable_conflict());
    Ok(())
}

#[tokio::test]
async fn stale_turn_version_is_rejected() -> Result<(), AppError> {
    let state = test_state().await?;
    let dto = seeded_turn_create(&state).await?;
    let turn = turns::create_turn(state.db(), dto).await?;

    let touched = turns::touch(state.db(), &turn).await?;
    assert_eq!(touched.version, turn.version + 1);

    let err: AppError = turns::transition(state.db(), &turn, TurnState::Canceled)
        .await
        .expect_err("stale turn version")
        .into();
    assert_eq!(err.code(), ErrorCode::OptimisticLock);

    let err: AppError = turns::transition(state.db(), &touched, TurnState::Completed)
        .await
        .expect_err("SUPPLYING cannot complete")
        .into();
    assert_eq!(err.code(), ErrorCode::TurnStateInvalid);
    Ok(())
}

#[tokio::test]
async fn selection_claim_succeeds_once_per_turn() -> Result<(), AppError> {
    let state = test_state().await?;
    let dto = seeded_turn_create(&state).await?;
    let turn = turns::create_turn(state.db(), dto).await?;

    let a = turn_fillers::add_filler(
        state.db(),
        turn.id,
        dto.definition_template_id,
        vec!["x".into(), "y".into()],
        FillerSource::Dictionary,
    )
    .await?;
    let b = turn_fillers::add_filler(
        state.db(),
        turn.id,
        dto.definition_template_id,
        vec!["p".into(), "q".into()],
        FillerSource::Generated,
    )
    .await?;

    assert!(turn_fillers::claim_selection(state.db(), turn.id, b.id, dto.selector_id).await?);
    assert!(!turn_fillers::claim_selection(state.db(), turn.id, a.id, dto.selector_id).await?);
    assert!(!turn_fillers::claim_selection(state.db(), turn.id, b.id, dto.selector_id).await?);

    let rows = turn_fillers::find_by_turn(state.db(), turn.id).await?;
    let chosen: Vec<i64> = rows
        .iter()
        .filter(|r| r.selector_id.is_some())
        .map(|r| r.id)
        .collect();
    assert_eq!(chosen, vec![b.id]);
    assert_eq!(turn_fillers::count_by_turn(state.db(), turn.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn supplier_may_fill_only_once_per_turn() -> Result<(), AppError> {
    let state = test_state().await?;
    let dto = seeded_turn_create(&state).await?;
    let turn = turns::create_turn(state.db(), dto).await?;
    let supplier = seed_player(state.db()).await?;

    turn_fillers::add_filler(
        state.db(),
        turn.id,
        dto.definition_template_id,
        vec!["a".into(), "b".into()],
        FillerSource::Supplier(supplier),
    )
    .await?;
    let err: AppError = turn_fillers::add_filler(
        state.db(),
        turn.id,
        dto.definition_template_id,
        vec!["c".into(), "d".into()],
        FillerSource::Supplier(supplier),
    )
    .await
    .expect_err("one row per supplier")
    .into();
    assert!(matches!(err, AppError::Conflict { .. }));
    Ok(())
}
