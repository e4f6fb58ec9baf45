//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::domain::fillers::{slot_plan, SlotPlan};
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game configuration as the engine sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub match_size: usize,
    pub filler_count: usize,
    pub is_active: bool,
}

impl Game {
    pub fn slot_plan(&self) -> Result<SlotPlan, DomainError> {
        slot_plan(self.match_size, self.filler_count)
    }

    /// `match_size` in the column type used by match counters.
    pub fn match_size_i16(&self) -> i16 {
        i16::try_from(self.match_size).unwrap_or(i16::MAX)
    }
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            match_size: usize::try_from(model.match_size).unwrap_or(0),
            filler_count: usize::try_from(model.filler_count).unwrap_or(0),
            is_active: model.is_active,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Active game or `NotFound(Game)`.
pub async fn require_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    games_adapter::find_active(conn, game_id)
        .await?
        .map(Game::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        })
}

/// Serialize matchmaking on the game: a concurrent claim blocks until this
/// transaction ends, so its candidate search sees any match opened here.
///
/// Must be the first statement of the transaction.
pub async fn claim_for_matchmaking<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, DomainError> {
    Ok(games_adapter::claim_for_matchmaking(conn, game_id).await? > 0)
}

/// Create a game after checking its sizing yields a valid slot plan.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: games_adapter::GameCreate,
) -> Result<Game, DomainError> {
    slot_plan(
        usize::try_from(dto.match_size).unwrap_or(0),
        usize::try_from(dto.filler_count).unwrap_or(0),
    )?;
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    is_active: bool,
) -> Result<Game, DomainError> {
    let game = games_adapter::set_active(conn, game_id, is_active).await?;
    Ok(Game::from(game))
}
