//! SeaORM adapter for match rosters.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::match_players::{self, MembershipStatus};

pub mod dto;

pub use dto::MembershipCreate;

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> Result<Option<match_players::Model>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .filter(match_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MembershipCreate,
) -> Result<match_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    match_players::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        player_id: Set(dto.player_id),
        status: Set(dto.status),
        join_seq: Set(dto.join_seq),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Turn an INVITED row into a JOINED one at roster position `join_seq`.
pub async fn promote_to_joined<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    join_seq: i16,
) -> Result<match_players::Model, sea_orm::DbErr> {
    match_players::ActiveModel {
        id: Set(membership_id),
        match_id: NotSet,
        player_id: NotSet,
        status: Set(MembershipStatus::Joined),
        join_seq: Set(Some(join_seq)),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    }
    .update(conn)
    .await
}

/// Every membership row of the match, joined and invited, in insertion order.
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_players::Model>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .order_by_asc(match_players::Column::Id)
        .all(conn)
        .await
}

/// Joined rows of the match in `join_seq` order.
pub async fn find_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_players::Model>, sea_orm::DbErr> {
    match_players::Entity::find()
        .filter(match_players::Column::MatchId.eq(match_id))
        .filter(match_players::Column::Status.eq(MembershipStatus::Joined))
        .order_by_asc(match_players::Column::JoinSeq)
        .all(conn)
        .await
}
