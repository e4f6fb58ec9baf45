//! SeaORM adapter for per-turn participant rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::turn_players;

pub async fn create_turn_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
    is_selector: bool,
) -> Result<turn_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    turn_players::ActiveModel {
        id: NotSet,
        turn_id: Set(turn_id),
        player_id: Set(player_id),
        is_selector: Set(is_selector),
        score: Set(0),
        viewed_replay: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<turn_players::Model>, sea_orm::DbErr> {
    turn_players::Entity::find()
        .filter(turn_players::Column::TurnId.eq(turn_id))
        .order_by_asc(turn_players::Column::Id)
        .all(conn)
        .await
}

pub async fn find_turn_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
) -> Result<Option<turn_players::Model>, sea_orm::DbErr> {
    turn_players::Entity::find()
        .filter(turn_players::Column::TurnId.eq(turn_id))
        .filter(turn_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// Set `viewed_replay`; returns whether the flag flipped.
pub async fn mark_viewed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = turn_players::Entity::update_many()
        .col_expr(turn_players::Column::ViewedReplay, Expr::val(true).into())
        .col_expr(
            turn_players::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(turn_players::Column::TurnId.eq(turn_id))
        .filter(turn_players::Column::PlayerId.eq(player_id))
        .filter(turn_players::Column::ViewedReplay.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
