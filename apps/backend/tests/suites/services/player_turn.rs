//! "What should this player do now" across open turns.

use lexibluff::domain::{PlayerAction, TurnRole};
use lexibluff::repos::turns;
use lexibluff::{AppError, Engine, ErrorCode};

use crate::common::{assert_code, test_engine};
use crate::support::{dictionary_row, seed_game, seed_player, seed_players, start_match, values};

/// Supply, select the canonical row and view the outcome for a two-player turn.
async fn play_turn(
    engine: &Engine,
    match_id: i64,
    selector: i64,
    supplier: i64,
) -> Result<i64, AppError> {
    let turn = engine.get_player_turn(match_id, supplier).await?;
    assert_eq!(turn.turn.selector_id, selector);
    engine
        .submit_filler(turn.turn.id, supplier, values("hat", "wearing"))
        .await?;
    let selecting = engine.get_player_turn(match_id, selector).await?;
    let chosen = selecting.candidates[0].id;
    engine.submit_selection(turn.turn.id, selector, chosen).await?;
    engine.mark_outcome_viewed(turn.turn.id, supplier).await?;
    Ok(turn.turn.id)
}

#[tokio::test]
async fn non_member_gets_match_not_found() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 2, 2).await?;
    let stranger = seed_player(state.db()).await?;

    assert_code(
        engine.get_player_turn(setup.match_id, stranger).await,
        ErrorCode::MatchNotFound,
    );
    assert_code(
        engine.get_player_turn(setup.match_id + 100, setup.players[0]).await,
        ErrorCode::MatchNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn waiting_match_has_no_turns() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let player = seed_player(state.db()).await?;
    let pending = engine.request_match(game, player, None).await?;

    assert_code(
        engine.get_player_turn(pending.id, player).await,
        ErrorCode::MatchStateInvalid,
    );
    Ok(())
}

#[tokio::test]
async fn invited_player_is_not_yet_a_member() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 2).await?;
    let pending = engine.request_match(game, ids[0], Some(ids[1])).await?;

    assert_code(
        engine.get_player_turn(pending.id, ids[1]).await,
        ErrorCode::MatchNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn repeated_polls_return_the_same_turn() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 2, 2).await?;

    let first = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?;
    let again = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?;
    let other = engine
        .get_player_turn(setup.match_id, setup.players[1])
        .await?;

    assert_eq!(first.turn.id, again.turn.id);
    assert_eq!(first.turn.id, other.turn.id);
    assert_eq!(turns::find_open_by_match(state.db(), setup.match_id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn candidate_order_is_stable_between_polls() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 3).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);
    let turn_id = engine.get_player_turn(setup.match_id, p1).await?.turn.id;
    engine
        .submit_filler(turn_id, p2, values("ant", "marching"))
        .await?;

    let a = engine.get_player_turn(setup.match_id, p1).await?;
    let b = engine.get_player_turn(setup.match_id, p1).await?;
    let order_a: Vec<i64> = a.candidates.iter().map(|c| c.id).collect();
    let order_b: Vec<i64> = b.candidates.iter().map(|c| c.id).collect();
    assert_eq!(order_a, order_b);
    Ok(())
}

#[tokio::test]
async fn selector_moves_on_before_supplier_views_outcome() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 3, 2).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);

    let first = engine.get_player_turn(setup.match_id, p1).await?.turn;
    engine
        .submit_filler(first.id, p2, values("elk", "grazing"))
        .await?;
    let canonical = dictionary_row(&state, first.id).await?;
    engine.submit_selection(first.id, p1, canonical.id).await?;

    // P1 is done with turn 1; polling creates turn 2 where P1 supplies
    let p1_next = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(p1_next.turn.seq, 2);
    assert_eq!(p1_next.turn.selector_id, p2);
    assert_eq!(p1_next.role, TurnRole::Supplier);
    assert_eq!(p1_next.action, PlayerAction::Supply);

    // Polling again does not create a third turn
    let p1_again = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(p1_again.turn.id, p1_next.turn.id);

    // P2 still owes turn 1 an outcome view, oldest first
    let p2_view = engine.get_player_turn(setup.match_id, p2).await?;
    assert_eq!(p2_view.turn.id, first.id);
    assert_eq!(p2_view.action, PlayerAction::ViewOutcome);

    engine.mark_outcome_viewed(first.id, p2).await?;
    let p2_next = engine.get_player_turn(setup.match_id, p2).await?;
    assert_eq!(p2_next.turn.id, p1_next.turn.id);
    assert_eq!(p2_next.role, TurnRole::Selector);
    assert_eq!(p2_next.action, PlayerAction::AwaitSupplies);
    Ok(())
}

#[tokio::test]
async fn selector_rotation_wraps_around_roster() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 4, 2).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);

    play_turn(&engine, setup.match_id, p1, p2).await?;
    play_turn(&engine, setup.match_id, p2, p1).await?;

    let third = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(third.turn.seq, 3);
    assert_eq!(third.turn.selector_id, p1);
    assert_eq!(third.action, PlayerAction::AwaitSupplies);
    Ok(())
}

#[tokio::test]
async fn canceled_turn_does_not_advance_rotation() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 3, 2).await?;
    let p1 = setup.players[0];

    let first = engine.get_player_turn(setup.match_id, p1).await?.turn;
    engine.cancel_turn(first.id).await?;

    let replacement = engine.get_player_turn(setup.match_id, p1).await?.turn;
    assert_eq!(replacement.seq, 2);
    assert_eq!(replacement.selector_id, p1);
    Ok(())
}

#[tokio::test]
async fn exhausted_words_surface_when_next_turn_is_needed() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);

    play_turn(&engine, setup.match_id, p1, p2).await?;

    assert_code(
        engine.get_player_turn(setup.match_id, p1).await,
        ErrorCode::WordsExhausted,
    );
    Ok(())
}
