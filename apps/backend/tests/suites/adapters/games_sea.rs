//! Game rows: matchmaking claim.

use lexibluff::adapters::games_sea;
use lexibluff::repos::games;
use lexibluff::{with_txn, AppError};

use crate::common::test_state;
use crate::support::seed_game;

#[tokio::test]
async fn matchmaking_claim_touches_only_known_games() -> Result<(), AppError> {
    let state = test_state().await?;
    let game = seed_game(state.db(), 2, 4).await?;

    let (known, unknown) = with_txn(state.db(), &(), |_, txn| {
        Box::pin(async move {
            let known = games::claim_for_matchmaking(txn, game).await?;
            let unknown = games::claim_for_matchmaking(txn, game + 1_000).await?;
            Ok((known, unknown))
        })
    })
    .await?;
    assert!(known);
    assert!(!unknown);

    let after = games::find_by_id(state.db(), game).await?.expect("game exists");
    assert!(after.is_active, "claim leaves the game unchanged");

    let row = games_sea::find_by_id(state.db(), game)
        .await?
        .expect("game row exists");
    assert_eq!(row.description, "2 players, 4 candidates");
    Ok(())
}
