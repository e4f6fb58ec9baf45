//! Roster rows: invitations, promotion and join order.

use lexibluff::repos::memberships::{self, MembershipStatus};
use lexibluff::repos::matches;
use lexibluff::{AppError, ErrorCode};

use crate::common::test_state;
use crate::support::{seed_game, seed_players};

#[tokio::test]
async fn invitation_is_promoted_with_next_join_seq() -> Result<(), AppError> {
    let state = test_state().await?;
    let game = seed_game(state.db(), 2, 4).await?;
    let ids = seed_players(state.db(), 2).await?;
    let m = matches::create_match(state.db(), game, 1, 2).await?;

    memberships::add_joined(state.db(), m.id, ids[0], 1).await?;
    let invited = memberships::add_invited(state.db(), m.id, ids[1]).await?;
    assert_eq!(invited.status, MembershipStatus::Invited);
    assert_eq!(invited.join_seq, None);
    assert!(!invited.is_joined());

    assert_eq!(
        memberships::roster_player_ids(state.db(), m.id).await?,
        vec![ids[0]]
    );

    let promoted = memberships::promote_to_joined(state.db(), invited.id, 2).await?;
    assert!(promoted.is_joined());
    assert_eq!(promoted.join_seq, Some(2));
    assert_eq!(
        memberships::roster_player_ids(state.db(), m.id).await?,
        vec![ids[0], ids[1]]
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_membership_and_join_seq_are_conflicts() -> Result<(), AppError> {
    let state = test_state().await?;
    let game = seed_game(state.db(), 3, 4).await?;
    let ids = seed_players(state.db(), 2).await?;
    let m = matches::create_match(state.db(), game, 1, 1).await?;
    memberships::add_joined(state.db(), m.id, ids[0], 1).await?;

    let err: AppError = memberships::add_joined(state.db(), m.id, ids[0], 2)
        .await
        .expect_err("player already in match")
        .into();
    assert_eq!(err.code(), ErrorCode::Conflict);

    let err: AppError = memberships::add_joined(state.db(), m.id, ids[1], 1)
        .await
        .expect_err("join_seq taken")
        .into();
    assert_eq!(err.code(), ErrorCode::Conflict);
    Ok(())
}
