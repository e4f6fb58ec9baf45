//! Full turn lifecycle: supply, bluff generation, selection, outcome.

use lexibluff::domain::{PlayerAction, TurnRole, TurnState};
use lexibluff::entities::words::LexicalClass;
use lexibluff::repos::turns;
use lexibluff::{AppError, ErrorCode};

use crate::common::{assert_code, test_engine};
use crate::support::{dictionary_row, start_match, turn_rows, values, withdraw_bluffs};

#[tokio::test]
async fn worked_example_two_players_four_candidates() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 3, 3).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);

    // First joiner selects first
    let p1_view = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(p1_view.turn.seq, 1);
    assert_eq!(p1_view.turn.selector_id, p1);
    assert_eq!(p1_view.role, TurnRole::Selector);
    assert_eq!(p1_view.action, PlayerAction::AwaitSupplies);
    let turn_id = p1_view.turn.id;

    let p2_view = engine.get_player_turn(setup.match_id, p2).await?;
    assert_eq!(p2_view.turn.id, turn_id);
    assert_eq!(p2_view.role, TurnRole::Supplier);
    assert_eq!(p2_view.action, PlayerAction::Supply);
    assert!(p2_view.candidates.is_empty());
    assert_eq!(
        p2_view.template.slot_classes,
        vec![LexicalClass::Noun, LexicalClass::Verb]
    );

    // The one supplier fills in, two bluffs top the turn up to four rows
    let summary = engine
        .submit_filler(turn_id, p2, values("cat", "sleeping"))
        .await?;
    assert_eq!(summary.state, TurnState::Selecting);

    let rows = turn_rows(&state, turn_id).await?;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.iter().filter(|r| r.is_dictionary).count(), 1);
    assert_eq!(rows.iter().filter(|r| r.supplier_id == Some(p2)).count(), 1);
    assert_eq!(
        rows.iter()
            .filter(|r| !r.is_dictionary && r.supplier_id.is_none())
            .count(),
        2
    );

    let select_view = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(select_view.action, PlayerAction::Select);
    assert_eq!(select_view.candidates.len(), 4);
    assert!(select_view.candidates.iter().all(|c| c.outcome.is_none()));
    assert!(select_view
        .candidates
        .iter()
        .any(|c| c.definition == "a cat used for sleeping"));

    // Supplied and nothing selected yet: nothing to do
    assert_code(
        engine.get_player_turn(setup.match_id, p2).await,
        ErrorCode::TurnNotFound,
    );

    let canonical = dictionary_row(&state, turn_id).await?;
    engine.submit_selection(turn_id, p1, canonical.id).await?;

    let outcome = engine.get_player_turn(setup.match_id, p2).await?;
    assert_eq!(outcome.turn.id, turn_id);
    assert_eq!(outcome.role, TurnRole::Supplier);
    assert_eq!(outcome.action, PlayerAction::ViewOutcome);
    let dictionary = outcome
        .dictionary_candidate()
        .expect("outcome reveals the dictionary row");
    assert_eq!(dictionary.id, canonical.id);
    assert_eq!(
        dictionary.outcome.and_then(|o| o.selector_id),
        Some(p1)
    );
    assert_eq!(dictionary.definition, "a tool used for digging");

    let done = engine.mark_outcome_viewed(turn_id, p2).await?;
    assert_eq!(done.state, TurnState::Completed);
    let turn = turns::require_turn(state.db(), turn_id).await?;
    assert!(turn.completed_at.is_some());

    // Both have progressed; the selector role rotates to P2
    let next = engine.get_player_turn(setup.match_id, p2).await?;
    assert_eq!(next.turn.seq, 2);
    assert_eq!(next.turn.selector_id, p2);
    assert_eq!(next.role, TurnRole::Selector);
    assert_ne!(next.turn.word_id, p1_view.turn.word_id);

    let p1_next = engine.get_player_turn(setup.match_id, p1).await?;
    assert_eq!(p1_next.turn.id, next.turn.id);
    assert_eq!(p1_next.action, PlayerAction::Supply);
    Ok(())
}

#[tokio::test]
async fn turn_waits_for_every_supplier() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 3, 5, 2, 2).await?;
    let turn = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn;

    let after_one = engine
        .submit_filler(turn.id, setup.players[1], values("owl", "hooting"))
        .await?;
    assert_eq!(after_one.state, TurnState::Supplying);
    assert_eq!(turn_rows(&state, turn.id).await?.len(), 2);

    assert_code(
        engine
            .submit_filler(turn.id, setup.players[1], values("owl", "again"))
            .await,
        ErrorCode::AlreadySupplied,
    );

    let after_two = engine
        .submit_filler(turn.id, setup.players[2], values("eel", "swimming"))
        .await?;
    assert_eq!(after_two.state, TurnState::Selecting);

    let rows = turn_rows(&state, turn.id).await?;
    assert_eq!(rows.len(), 5);
    assert_eq!(rows.iter().filter(|r| r.is_dictionary).count(), 1);
    assert!(rows.iter().all(|r| r.selector_id.is_none()));
    Ok(())
}

#[tokio::test]
async fn match_size_equal_to_filler_count_generates_no_bluffs() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 2, 1, 0).await?;
    let turn = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn;

    let summary = engine
        .submit_filler(turn.id, setup.players[1], values("mole", "tunnelling"))
        .await?;
    assert_eq!(summary.state, TurnState::Selecting);
    assert_eq!(turn_rows(&state, turn.id).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn filler_rules_are_enforced() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 1, 2).await?;
    let (p1, p2) = (setup.players[0], setup.players[1]);
    let turn_id = engine.get_player_turn(setup.match_id, p1).await?.turn.id;

    assert_code(
        engine.submit_filler(turn_id, p1, values("a", "b")).await,
        ErrorCode::RoleMismatch,
    );
    assert_code(
        engine
            .submit_filler(turn_id, p2, vec!["only-one".to_string()])
            .await,
        ErrorCode::FillerSlotMismatch,
    );
    assert_code(
        engine.submit_filler(turn_id, 9_999, values("a", "b")).await,
        ErrorCode::RoleMismatch,
    );
    assert_code(
        engine.submit_filler(turn_id + 100, p2, values("a", "b")).await,
        ErrorCode::TurnNotFound,
    );

    engine.submit_filler(turn_id, p2, values("fox", "running")).await?;
    assert_code(
        engine.submit_filler(turn_id, p2, values("fox", "again")).await,
        ErrorCode::TurnStateInvalid,
    );
    Ok(())
}

#[tokio::test]
async fn word_short_of_bluffs_is_never_drawn() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    // Two generated slots needed, one bluff seeded
    let setup = start_match(&engine, &state, 2, 4, 1, 1).await?;

    assert_code(
        engine
            .get_player_turn(setup.match_id, setup.players[0])
            .await,
        ErrorCode::WordsExhausted,
    );
    assert!(turns::used_word_ids(state.db(), setup.match_id)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn bluffs_withdrawn_mid_turn_roll_back_the_last_supply() -> Result<(), AppError> {
    let (engine, state) = test_engine().await?;
    let setup = start_match(&engine, &state, 2, 4, 2, 2).await?;
    let first = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn;
    let template_id = setup
        .words
        .iter()
        .find(|w| w.word_id == first.word_id)
        .map(|w| w.template_id)
        .expect("turn word was seeded");
    withdraw_bluffs(state.db(), template_id).await?;

    assert_code(
        engine
            .submit_filler(first.id, setup.players[1], values("bee", "buzzing"))
            .await,
        ErrorCode::BluffFillersExhausted,
    );
    let rows = turn_rows(&state, first.id).await?;
    assert_eq!(rows.len(), 1, "only the canonical row survives");
    let turn = turns::require_turn(state.db(), first.id).await?;
    assert_eq!(turn.state, TurnState::Supplying);

    // Canceling the stuck turn lets play move to the other word
    engine.cancel_turn(first.id).await?;
    let next = engine
        .get_player_turn(setup.match_id, setup.players[0])
        .await?
        .turn;
    assert_ne!(next.word_id, first.word_id);
    assert_eq!(next.state, TurnState::Supplying);
    Ok(())
}
