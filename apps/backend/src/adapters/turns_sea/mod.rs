//! SeaORM adapter for turns - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::turns::{self, TurnState};
use crate::infra::db_errors::optimistic_lock_err;

pub mod dto;

pub use dto::{TurnCreate, TurnUpdate};

fn not_found() -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound("Turn not found".to_string())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find_by_id(turn_id).one(conn).await
}

pub async fn require_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<turns::Model, sea_orm::DbErr> {
    find_by_id(conn, turn_id).await?.ok_or_else(not_found)
}

pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<turns::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    turns::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        seq: Set(dto.seq),
        word_id: Set(dto.word_id),
        definition_template_id: Set(dto.definition_template_id),
        selector_id: Set(dto.selector_id),
        state: Set(TurnState::Supplying),
        created_at: Set(now),
        updated_at: Set(now),
        canceled_at: Set(None),
        completed_at: Set(None),
        version: Set(1),
    }
    .insert(conn)
    .await
}

/// Conditional update on `(id, version)`, then refetch.
pub async fn update_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnUpdate,
) -> Result<turns::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    let mut update = turns::Entity::update_many()
        .col_expr(turns::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            turns::Column::Version,
            Expr::col(turns::Column::Version).add(1),
        );
    if let Some(state) = dto.state {
        update = update.col_expr(turns::Column::State, Expr::val(state.to_value()).into());
    }
    if let Some(at) = dto.canceled_at {
        update = update.col_expr(turns::Column::CanceledAt, Expr::val(Some(at)).into());
    }
    if let Some(at) = dto.completed_at {
        update = update.col_expr(turns::Column::CompletedAt, Expr::val(Some(at)).into());
    }

    let result = update
        .filter(turns::Column::Id.eq(dto.id))
        .filter(turns::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(current) => Err(optimistic_lock_err(
                "Turn",
                dto.id,
                dto.expected_version,
                current.version,
            )),
            None => Err(not_found()),
        };
    }

    require_turn(conn, dto.id).await
}

/// SUPPLYING and SELECTING turns of the match, oldest first.
pub async fn find_open_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::MatchId.eq(match_id))
        .filter(turns::Column::State.is_in([TurnState::Supplying, TurnState::Selecting]))
        .order_by_asc(turns::Column::Seq)
        .all(conn)
        .await
}

/// Highest turn number used by the match, any state.
pub async fn max_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<i32>, sea_orm::DbErr> {
    turns::Entity::find()
        .select_only()
        .column(turns::Column::Seq)
        .filter(turns::Column::MatchId.eq(match_id))
        .order_by_desc(turns::Column::Seq)
        .into_tuple::<i32>()
        .one(conn)
        .await
}

/// Most recent turn of the match that was not canceled.
pub async fn find_last_not_canceled<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::MatchId.eq(match_id))
        .filter(turns::Column::State.ne(TurnState::Canceled))
        .order_by_desc(turns::Column::Seq)
        .one(conn)
        .await
}

/// Words used by any turn of the match, terminal or not.
pub async fn used_word_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    turns::Entity::find()
        .select_only()
        .column(turns::Column::WordId)
        .filter(turns::Column::MatchId.eq(match_id))
        .distinct()
        .into_tuple::<i64>()
        .all(conn)
        .await
}
