//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Active game by id; inactive games are reported as absent.
pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::IsActive.eq(true))
        .one(conn)
        .await
}

/// No-op write on the game row. Holds its row lock (Postgres) or the
/// database write lock (SQLite) until the transaction ends.
///
/// Returns the number of rows touched; 0 for an unknown game.
pub async fn claim_for_matchmaking<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::IsActive, Expr::col(games::Column::IsActive).into())
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        match_size: Set(dto.match_size),
        filler_count: Set(dto.filler_count),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    is_active: bool,
) -> Result<games::Model, sea_orm::DbErr> {
    let game = games::ActiveModel {
        id: Set(game_id),
        name: NotSet,
        description: NotSet,
        match_size: NotSet,
        filler_count: NotSet,
        is_active: Set(is_active),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    game.update(conn).await
}
