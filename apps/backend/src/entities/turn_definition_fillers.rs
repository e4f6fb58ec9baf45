use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turn_definition_fillers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "turn_id")]
    pub turn_id: i64,
    #[sea_orm(column_name = "template_id")]
    pub template_id: i64,
    /// JSON array of slot values, in slot order
    pub filler: Json,
    #[sea_orm(column_name = "is_dictionary")]
    pub is_dictionary: bool,
    /// NULL for canonical and generated rows
    #[sea_orm(column_name = "supplier_id")]
    pub supplier_id: Option<i64>,
    /// Set on the chosen row only
    #[sea_orm(column_name = "selector_id")]
    pub selector_id: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::turns::Entity",
        from = "Column::TurnId",
        to = "super::turns::Column::Id"
    )]
    Turn,
}

impl Related<super::turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turn.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
