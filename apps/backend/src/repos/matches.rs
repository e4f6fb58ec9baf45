//! Match repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::MatchState;
use crate::entities::matches;
use crate::entities::matches::MatchState as DbMatchState;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub game_id: i64,
    pub state: MatchState,
    pub player_count: i16,
    pub reserved_count: i16,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub canceled_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub version: i32,
}

impl From<DbMatchState> for MatchState {
    fn from(state: DbMatchState) -> Self {
        match state {
            DbMatchState::Waiting => MatchState::Waiting,
            DbMatchState::Started => MatchState::Started,
            DbMatchState::Canceled => MatchState::Canceled,
            DbMatchState::Completed => MatchState::Completed,
        }
    }
}

impl From<MatchState> for DbMatchState {
    fn from(state: MatchState) -> Self {
        match state {
            MatchState::Waiting => DbMatchState::Waiting,
            MatchState::Started => DbMatchState::Started,
            MatchState::Canceled => DbMatchState::Canceled,
            MatchState::Completed => DbMatchState::Completed,
        }
    }
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            state: model.state.into(),
            player_count: model.player_count,
            reserved_count: model.reserved_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
            started_at: model.started_at,
            canceled_at: model.canceled_at,
            completed_at: model.completed_at,
            version: model.version,
        }
    }
}

/// Field changes for [`update_match`]; counters are absolute values.
#[derive(Debug, Clone, Default)]
pub struct MatchChanges {
    pub state: Option<MatchState>,
    pub player_count: Option<i16>,
    pub reserved_count: Option<i16>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let m = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(m.map(Match::from))
}

/// Match by id or `NotFound(Match)`.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    find_by_id(conn, match_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
    })
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_count: i16,
    reserved_count: i16,
) -> Result<Match, DomainError> {
    let dto = matches_adapter::MatchCreate {
        game_id,
        player_count,
        reserved_count,
    };
    let m = matches_adapter::create_match(conn, dto).await?;
    Ok(Match::from(m))
}

/// Apply `changes` against `expected_version`.
///
/// Lifecycle timestamps follow the target state: STARTED stamps
/// `started_at`, CANCELED stamps `canceled_at`, COMPLETED stamps
/// `completed_at`. A moved version surfaces as `Conflict(OptimisticLock)`.
pub async fn update_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    expected_version: i32,
    changes: MatchChanges,
) -> Result<Match, DomainError> {
    let now = OffsetDateTime::now_utc();
    let mut dto = matches_adapter::MatchUpdate::new(match_id, expected_version);
    if let Some(state) = changes.state {
        dto = dto.with_state(state.into());
        match state {
            MatchState::Started => dto = dto.with_started_at(now),
            MatchState::Canceled => dto = dto.with_canceled_at(now),
            MatchState::Completed => dto = dto.with_completed_at(now),
            MatchState::Waiting => {}
        }
    }
    if let Some(count) = changes.player_count {
        dto = dto.with_player_count(count);
    }
    if let Some(count) = changes.reserved_count {
        dto = dto.with_reserved_count(count);
    }
    let m = matches_adapter::update_match(conn, dto).await?;
    Ok(Match::from(m))
}

pub async fn find_random_candidate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    requester_id: i64,
    match_size: i16,
) -> Result<Option<Match>, DomainError> {
    let m = matches_adapter::find_random_candidate(conn, game_id, requester_id, match_size).await?;
    Ok(m.map(Match::from))
}

pub async fn find_opponent_candidate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    requester_id: i64,
    opponent_id: i64,
    match_size: i16,
) -> Result<Option<Match>, DomainError> {
    let m = matches_adapter::find_opponent_candidate(
        conn,
        game_id,
        requester_id,
        opponent_id,
        match_size,
    )
    .await?;
    Ok(m.map(Match::from))
}

pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
    limit: u64,
    offset: u64,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::list_for_player(conn, game_id, player_id, limit, offset).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

pub async fn find_stale_waiting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_stale_waiting(conn, cutoff).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}
