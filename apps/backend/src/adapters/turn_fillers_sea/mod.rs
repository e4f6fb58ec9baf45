//! SeaORM adapter for a turn's candidate definitions.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::turn_definition_fillers;

#[derive(Debug, Clone)]
pub struct TurnFillerCreate {
    pub turn_id: i64,
    pub template_id: i64,
    pub values: Vec<String>,
    pub is_dictionary: bool,
    pub supplier_id: Option<i64>,
}

pub async fn create_turn_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnFillerCreate,
) -> Result<turn_definition_fillers::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    turn_definition_fillers::ActiveModel {
        id: NotSet,
        turn_id: Set(dto.turn_id),
        template_id: Set(dto.template_id),
        filler: Set(serde_json::json!(dto.values)),
        is_dictionary: Set(dto.is_dictionary),
        supplier_id: Set(dto.supplier_id),
        selector_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<turn_definition_fillers::Model>, sea_orm::DbErr> {
    turn_definition_fillers::Entity::find()
        .filter(turn_definition_fillers::Column::TurnId.eq(turn_id))
        .order_by_asc(turn_definition_fillers::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    turn_definition_fillers::Entity::find()
        .filter(turn_definition_fillers::Column::TurnId.eq(turn_id))
        .count(conn)
        .await
}

/// Record `selector_id` on the row unless the turn already has a selection.
/// Returns false when another row (or this one) was chosen first.
pub async fn claim_selection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    filler_id: i64,
    selector_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let already = turn_definition_fillers::Entity::find()
        .filter(turn_definition_fillers::Column::TurnId.eq(turn_id))
        .filter(turn_definition_fillers::Column::SelectorId.is_not_null())
        .count(conn)
        .await?;
    if already > 0 {
        return Ok(false);
    }

    let result = turn_definition_fillers::Entity::update_many()
        .col_expr(
            turn_definition_fillers::Column::SelectorId,
            Expr::val(Some(selector_id)).into(),
        )
        .col_expr(
            turn_definition_fillers::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(turn_definition_fillers::Column::Id.eq(filler_id))
        .filter(turn_definition_fillers::Column::TurnId.eq(turn_id))
        .filter(turn_definition_fillers::Column::SelectorId.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}
