//! Selection is one-time and only for the selector.

use lexibluff::domain::TurnState;
use lexibluff::{AppError, ErrorCode};

use crate::common::{assert_code, test_engine};
use crate::support::{dictionary_row, start_match, turn_rows, values, StartedMatch};

async fn selecting_turn(
    engine: &lexibluff::Engine,
    setup: &StartedMatch,
) -> Result<i64, AppError> {
    let turn_id = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn
        .id;
    engine
        .submit_filler(turn_id, setup.players[1], values("yak", "climbing"))
        .await?;
    Ok(turn_id)
}

#[tokio::test]
async fn second_selection_is_rejected_and_first_kept() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let selector = setup.players[0];
    let turn_id = selecting_turn(&engine, &setup).await?;

    let rows = turn_rows(&state, turn_id).await?;
    let bluff = rows
        .iter()
        .find(|r| !r.is_dictionary)
        .expect("turn has bluff rows");
    engine.submit_selection(turn_id, selector, bluff.id).await?;

    let canonical = dictionary_row(&state, turn_id).await?;
    let err = assert_code(
        engine.submit_selection(turn_id, selector, canonical.id).await,
        ErrorCode::AlreadySelected,
    );
    assert!(matches!(
        err,
        AppError::InvalidState { .. } | AppError::Conflict { .. }
    ));

    let rows = turn_rows(&state, turn_id).await?;
    let selected: Vec<_> = rows.iter().filter(|r| r.selector_id.is_some()).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, bluff.id);
    assert_eq!(selected[0].selector_id, Some(selector));
    Ok(())
}

#[tokio::test]
async fn only_the_selector_may_select() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let turn_id = selecting_turn(&engine, &setup).await?;
    let canonical = dictionary_row(&state, turn_id).await?;

    assert_code(
        engine
            .submit_selection(turn_id, setup.players[1], canonical.id)
            .await,
        ErrorCode::RoleMismatch,
    );
    assert!(turn_rows(&state, turn_id)
        .await?
        .iter()
        .all(|r| r.selector_id.is_none()));
    Ok(())
}

#[tokio::test]
async fn selection_must_name_a_row_of_the_turn() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let turn_id = selecting_turn(&engine, &setup).await?;

    assert_code(
        engine
            .submit_selection(turn_id, setup.players[0], 9_999)
            .await,
        ErrorCode::FillerNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn selection_waits_for_supplying_to_finish() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let turn_id = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn
        .id;
    let canonical = dictionary_row(&state, turn_id).await?;

    assert_code(
        engine
            .submit_selection(turn_id, setup.players[0], canonical.id)
            .await,
        ErrorCode::TurnStateInvalid,
    );
    assert_code(
        engine.mark_outcome_viewed(turn_id, setup.players[1]).await,
        ErrorCode::TurnStateInvalid,
    );
    Ok(())
}

#[tokio::test]
async fn outcome_view_requires_a_selection() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let turn_id = selecting_turn(&engine, &setup).await?;

    assert_code(
        engine.mark_outcome_viewed(turn_id, setup.players[1]).await,
        ErrorCode::TurnStateInvalid,
    );

    let canonical = dictionary_row(&state, turn_id).await?;
    let after_select = engine
        .submit_selection(turn_id, setup.players[0], canonical.id)
        .await?;
    assert_eq!(after_select.state, TurnState::Selecting);

    let done = engine.mark_outcome_viewed(turn_id, setup.players[1]).await?;
    assert_eq!(done.state, TurnState::Completed);

    assert_code(
        engine.mark_outcome_viewed(turn_id, setup.players[1]).await,
        ErrorCode::TurnStateInvalid,
    );
    Ok(())
}
