//! Player repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            is_active: model.is_active,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_username(conn, username).await?;
    Ok(player.map(Player::from))
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Player, DomainError> {
    let player = players_adapter::create_player(conn, username).await?;
    Ok(Player::from(player))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    is_active: bool,
) -> Result<Player, DomainError> {
    let player = players_adapter::set_active(conn, player_id, is_active).await?;
    Ok(Player::from(player))
}
