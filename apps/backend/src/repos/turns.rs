//! Turn repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::turns_sea as turns_adapter;
use crate::domain::TurnState;
use crate::entities::turns;
use crate::entities::turns::TurnState as DbTurnState;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: i64,
    pub match_id: i64,
    pub seq: i32,
    pub word_id: i64,
    pub template_id: i64,
    pub selector_id: i64,
    pub state: TurnState,
    pub created_at: OffsetDateTime,
    pub canceled_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub version: i32,
}

impl From<DbTurnState> for TurnState {
    fn from(state: DbTurnState) -> Self {
        match state {
            DbTurnState::Supplying => TurnState::Supplying,
            DbTurnState::Selecting => TurnState::Selecting,
            DbTurnState::Canceled => TurnState::Canceled,
            DbTurnState::Completed => TurnState::Completed,
        }
    }
}

impl From<TurnState> for DbTurnState {
    fn from(state: TurnState) -> Self {
        match state {
            TurnState::Supplying => DbTurnState::Supplying,
            TurnState::Selecting => DbTurnState::Selecting,
            TurnState::Canceled => DbTurnState::Canceled,
            TurnState::Completed => DbTurnState::Completed,
        }
    }
}

impl From<turns::Model> for Turn {
    fn from(model: turns::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            seq: model.seq,
            word_id: model.word_id,
            template_id: model.definition_template_id,
            selector_id: model.selector_id,
            state: model.state.into(),
            created_at: model.created_at,
            canceled_at: model.canceled_at,
            completed_at: model.completed_at,
            version: model.version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns_adapter::find_by_id(conn, turn_id).await?;
    Ok(turn.map(Turn::from))
}

/// Turn by id or `NotFound(Turn)`.
pub async fn require_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Turn, DomainError> {
    find_by_id(conn, turn_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Turn, format!("Turn {turn_id} not found"))
    })
}

pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: turns_adapter::TurnCreate,
) -> Result<Turn, DomainError> {
    let turn = turns_adapter::create_turn(conn, dto).await?;
    Ok(Turn::from(turn))
}

/// Move the turn to `next` under a version check, stamping the terminal
/// timestamp for CANCELED and COMPLETED.
pub async fn transition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn: &Turn,
    next: TurnState,
) -> Result<Turn, DomainError> {
    let next = turn.state.transition(next)?;
    let now = OffsetDateTime::now_utc();
    let mut dto = turns_adapter::TurnUpdate::new(turn.id, turn.version).with_state(next.into());
    match next {
        TurnState::Canceled => dto = dto.with_canceled_at(now),
        TurnState::Completed => dto = dto.with_completed_at(now),
        TurnState::Supplying | TurnState::Selecting => {}
    }
    let updated = turns_adapter::update_turn(conn, dto).await?;
    Ok(Turn::from(updated))
}

/// Bump the version without changing fields; claims the row for a
/// check-then-write on its children.
pub async fn touch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn: &Turn,
) -> Result<Turn, DomainError> {
    let dto = turns_adapter::TurnUpdate::new(turn.id, turn.version);
    let updated = turns_adapter::update_turn(conn, dto).await?;
    Ok(Turn::from(updated))
}

pub async fn find_open_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Turn>, DomainError> {
    let rows = turns_adapter::find_open_by_match(conn, match_id).await?;
    Ok(rows.into_iter().map(Turn::from).collect())
}

pub async fn next_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<i32, DomainError> {
    let max = turns_adapter::max_seq(conn, match_id).await?;
    Ok(max.unwrap_or(0) + 1)
}

pub async fn find_last_not_canceled<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns_adapter::find_last_not_canceled(conn, match_id).await?;
    Ok(turn.map(Turn::from))
}

pub async fn used_word_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(turns_adapter::used_word_ids(conn, match_id).await?)
}
