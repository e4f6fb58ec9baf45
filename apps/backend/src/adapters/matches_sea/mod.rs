//! SeaORM adapter for matches - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, Query, SelectStatement};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::match_players::{self, MembershipStatus};
use crate::entities::matches::{self, MatchState};
use crate::infra::db_errors::optimistic_lock_err;

pub mod dto;

pub use dto::{MatchCreate, MatchUpdate};

fn not_found() -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound("Match not found".to_string())
}

/// Apply `dto` only if the stored version still equals `expected_version`,
/// then refetch. Zero affected rows is either a lost race (row exists) or a
/// missing match.
pub async fn update_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchUpdate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let mut update = matches::Entity::update_many()
        .col_expr(matches::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            matches::Column::Version,
            Expr::col(matches::Column::Version).add(1),
        );
    if let Some(state) = dto.state {
        update = update.col_expr(matches::Column::State, Expr::val(state.to_value()).into());
    }
    if let Some(count) = dto.player_count {
        update = update.col_expr(matches::Column::PlayerCount, Expr::val(count).into());
    }
    if let Some(count) = dto.reserved_count {
        update = update.col_expr(matches::Column::ReservedCount, Expr::val(count).into());
    }
    if let Some(at) = dto.started_at {
        update = update.col_expr(matches::Column::StartedAt, Expr::val(Some(at)).into());
    }
    if let Some(at) = dto.canceled_at {
        update = update.col_expr(matches::Column::CanceledAt, Expr::val(Some(at)).into());
    }
    if let Some(at) = dto.completed_at {
        update = update.col_expr(matches::Column::CompletedAt, Expr::val(Some(at)).into());
    }

    let result = update
        .filter(matches::Column::Id.eq(dto.id))
        .filter(matches::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(current) => Err(optimistic_lock_err(
                "Match",
                dto.id,
                dto.expected_version,
                current.version,
            )),
            None => Err(not_found()),
        };
    }

    require_match(conn, dto.id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id).await?.ok_or_else(not_found)
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    matches::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        state: Set(MatchState::Waiting),
        player_count: Set(dto.player_count),
        reserved_count: Set(dto.reserved_count),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        canceled_at: Set(None),
        completed_at: Set(None),
        version: Set(1),
    }
    .insert(conn)
    .await
}

/// `SELECT match_id FROM match_players WHERE player_id = ? [AND status = ?]`
fn match_ids_with_member(player_id: i64, status: Option<MembershipStatus>) -> SelectStatement {
    let mut select = Query::select();
    select
        .column(match_players::Column::MatchId)
        .from(match_players::Entity)
        .and_where(match_players::Column::PlayerId.eq(player_id));
    if let Some(status) = status {
        select.and_where(match_players::Column::Status.eq(status));
    }
    select.to_owned()
}

/// Oldest (lowest id) WAITING match of the game with a free seat that the requester has
/// no membership row in (joined or invited).
pub async fn find_random_candidate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    requester_id: i64,
    match_size: i16,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::GameId.eq(game_id))
        .filter(matches::Column::State.eq(MatchState::Waiting))
        .filter(matches::Column::ReservedCount.lt(match_size))
        .filter(matches::Column::Id.not_in_subquery(match_ids_with_member(requester_id, None)))
        .order_by_asc(matches::Column::Id)
        .one(conn)
        .await
}

/// Oldest WAITING match of the game where the opponent is joined and the
/// requester is not. The requester must either hold an invitation there or
/// find a free seat.
pub async fn find_opponent_candidate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    requester_id: i64,
    opponent_id: i64,
    match_size: i16,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::GameId.eq(game_id))
        .filter(matches::Column::State.eq(MatchState::Waiting))
        .filter(matches::Column::Id.in_subquery(match_ids_with_member(
            opponent_id,
            Some(MembershipStatus::Joined),
        )))
        .filter(matches::Column::Id.not_in_subquery(match_ids_with_member(
            requester_id,
            Some(MembershipStatus::Joined),
        )))
        .filter(
            Condition::any()
                .add(matches::Column::Id.in_subquery(match_ids_with_member(
                    requester_id,
                    Some(MembershipStatus::Invited),
                )))
                .add(matches::Column::ReservedCount.lt(match_size)),
        )
        .order_by_asc(matches::Column::Id)
        .one(conn)
        .await
}

/// Matches of a game the player is joined to, newest first.
pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
    limit: u64,
    offset: u64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::GameId.eq(game_id))
        .filter(matches::Column::Id.in_subquery(match_ids_with_member(
            player_id,
            Some(MembershipStatus::Joined),
        )))
        .order_by_desc(matches::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

/// WAITING matches untouched since before `cutoff`, oldest first.
pub async fn find_stale_waiting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::State.eq(MatchState::Waiting))
        .filter(matches::Column::UpdatedAt.lt(cutoff))
        .order_by_asc(matches::Column::UpdatedAt)
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}
