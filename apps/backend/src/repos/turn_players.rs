//! Per-turn participant rows.

use sea_orm::ConnectionTrait;

use crate::adapters::turn_players_sea as turn_players_adapter;
use crate::entities::turn_players;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlayer {
    pub id: i64,
    pub turn_id: i64,
    pub player_id: i64,
    pub is_selector: bool,
    pub score: i32,
    pub viewed_outcome: bool,
}

impl From<turn_players::Model> for TurnPlayer {
    fn from(model: turn_players::Model) -> Self {
        Self {
            id: model.id,
            turn_id: model.turn_id,
            player_id: model.player_id,
            is_selector: model.is_selector,
            score: model.score,
            viewed_outcome: model.viewed_replay,
        }
    }
}

/// One row per roster member; exactly `selector_id` is flagged as selector.
pub async fn create_for_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    roster: &[i64],
    selector_id: i64,
) -> Result<Vec<TurnPlayer>, DomainError> {
    let mut rows = Vec::with_capacity(roster.len());
    for &player_id in roster {
        let row = turn_players_adapter::create_turn_player(
            conn,
            turn_id,
            player_id,
            player_id == selector_id,
        )
        .await?;
        rows.push(TurnPlayer::from(row));
    }
    Ok(rows)
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<TurnPlayer>, DomainError> {
    let rows = turn_players_adapter::find_by_turn(conn, turn_id).await?;
    Ok(rows.into_iter().map(TurnPlayer::from).collect())
}

pub async fn find_turn_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
) -> Result<Option<TurnPlayer>, DomainError> {
    let row = turn_players_adapter::find_turn_player(conn, turn_id, player_id).await?;
    Ok(row.map(TurnPlayer::from))
}

pub async fn mark_viewed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
) -> Result<bool, DomainError> {
    Ok(turn_players_adapter::mark_viewed(conn, turn_id, player_id).await?)
}
